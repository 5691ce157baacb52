//! Durable repository configuration
//!
//! Two JSON files live in the metadata directory:
//!
//! - `config`: `{"author": <name or null>, "remotes": {<name>: <url>}}`
//! - `auth`: `{"token": <token or null>}`
//!
//! They are kept apart so the token never shows up when the remotes are
//! listed or shared.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config";
pub const AUTH_FILE_NAME: &str = "auth";

/// Author and named remotes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub remotes: BTreeMap<String, String>,
}

/// Stored access token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRecord {
    #[serde(default)]
    pub token: Option<String>,
}

impl AuthRecord {
    /// The token, unless absent or blank
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.trim().is_empty())
    }
}

#[derive(Debug)]
pub struct Config {
    /// Path to the metadata directory (typically `.gitx`)
    path: Box<Path>,
}

impl Config {
    pub fn new(path: Box<Path>) -> Self {
        Config { path }
    }

    pub fn config_path(&self) -> Box<Path> {
        self.path.join(CONFIG_FILE_NAME).into_boxed_path()
    }

    pub fn auth_path(&self) -> Box<Path> {
        self.path.join(AUTH_FILE_NAME).into_boxed_path()
    }

    /// Write an empty configuration unless one exists
    pub fn init(&self) -> anyhow::Result<()> {
        if self.config_path().exists() {
            return Ok(());
        }

        self.save(&RemoteConfig::default())
    }

    /// Load the configuration; a missing file is an empty configuration
    pub fn load(&self) -> anyhow::Result<RemoteConfig> {
        Self::read_json(&self.config_path())
    }

    pub fn save(&self, config: &RemoteConfig) -> anyhow::Result<()> {
        Self::write_json(&self.config_path(), config)
    }

    /// Load the auth record; a missing file means unauthenticated
    pub fn load_auth(&self) -> anyhow::Result<AuthRecord> {
        Self::read_json(&self.auth_path())
    }

    pub fn save_auth(&self, auth: &AuthRecord) -> anyhow::Result<()> {
        Self::write_json(&self.auth_path(), auth)
    }

    fn read_json<T: DeserializeOwned + Default>(path: &Path) -> anyhow::Result<T> {
        if !path.exists() {
            return Ok(T::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read {}", path.display()))?;

        if content.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
    }

    fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(value)?;

        std::fs::write(path, content).with_context(|| format!("Unable to write {}", path.display()))
    }
}
