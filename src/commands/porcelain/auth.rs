use crate::areas::config::AuthRecord;
use crate::areas::repository::Repository;

impl Repository {
    /// Store the hosting access token used by push
    pub fn auth(&mut self, token: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let token = token.trim();
        if token.is_empty() {
            anyhow::bail!("access token cannot be empty");
        }

        self.config().save_auth(&AuthRecord {
            token: Some(token.to_string()),
        })?;

        writeln!(self.writer(), "GitHub token saved")?;

        Ok(())
    }
}
