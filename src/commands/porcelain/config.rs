use crate::areas::repository::Repository;

/// Keys `config` can set
const AUTHOR_KEY: &str = "author";

impl Repository {
    /// Set a configuration value, or print it when `value` is `None`
    pub fn config_value(&mut self, key: &str, value: Option<&str>) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if key != AUTHOR_KEY {
            anyhow::bail!("unknown config key: {} (supported: {})", key, AUTHOR_KEY);
        }

        let mut config = self.config().load()?;

        match value {
            Some(value) => {
                let value = value.trim();
                config.author = (!value.is_empty()).then(|| value.to_string());
                self.config().save(&config)?;
            }
            None => {
                if let Some(author) = &config.author {
                    writeln!(self.writer(), "{}", author)?;
                }
            }
        }

        Ok(())
    }
}
