use crate::areas::repository::Repository;
use crate::artifacts::core::GitxError;
use crate::artifacts::remote::remote_url::RemoteUrl;
use tracing::{info, warn};

impl Repository {
    /// Register a named remote; re-adding a name replaces its URL
    pub fn add_remote(&mut self, name: &str, url: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        // accepted as is, push reports unsupported hosts
        if let Err(err) = RemoteUrl::try_parse(url) {
            warn!(%name, %url, error = %err, "remote URL cannot be pushed to");
        }

        let mut config = self.config().load()?;
        config.remotes.insert(name.to_string(), url.to_string());
        self.config().save(&config)?;

        info!(%name, %url, "added remote");
        writeln!(self.writer(), "Added remote {} = {}", name, url)?;

        Ok(())
    }

    pub fn remove_remote(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let mut config = self.config().load()?;
        if config.remotes.remove(name).is_none() {
            return Err(GitxError::RemoteNotFound(name.to_string()).into());
        }
        self.config().save(&config)?;

        writeln!(self.writer(), "Removed remote {}", name)?;

        Ok(())
    }

    /// Print `<name>\t<url>` per remote, sorted by name
    pub fn list_remotes(&mut self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let config = self.config().load()?;
        for (name, url) in &config.remotes {
            writeln!(self.writer(), "{}\t{}", name, url)?;
        }

        Ok(())
    }
}
