//! Runtime configuration.
//!
//! Stored in `.ticketforge/config.toml`:
//!
//! ```toml
//! [tracker]
//! base_url = "https://example.atlassian.net"
//! project_key = "PROJ"
//! email = "me@example.com"
//! token_env = "TICKETFORGE_API_TOKEN"             # default
//! timeout_secs = 30                               # default
//! epic_link_field = "customfield_10014"           # optional
//! acceptance_criteria_field = "customfield_10020" # optional
//! ```
//!
//! The API token itself never lives in the file; it is read from the named
//! environment variable when a tracker call is about to be made.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracker::{FieldMapping, TrackerSettings};
use workitems::ProjectKey;

pub const DEFAULT_CONFIG_PATH: &str = ".ticketforge/config.toml";

const DEFAULT_TOKEN_ENV: &str = "TICKETFORGE_API_TOKEN";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("API token not found\n  hint: export {0}=<token>")]
    MissingToken(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub tracker: TrackerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    pub base_url: String,
    pub project_key: String,
    pub email: String,
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(flatten)]
    pub fields: FieldMapping,
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Config {
    /// Reads, parses and validates the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tracker.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("tracker.base_url is empty".into()));
        }
        if self.tracker.email.trim().is_empty() {
            return Err(ConfigError::Invalid("tracker.email is empty".into()));
        }
        if self.tracker.timeout_secs == 0 {
            return Err(ConfigError::Invalid("tracker.timeout_secs must be positive".into()));
        }
        self.project_key().map(|_| ())
    }

    pub fn project_key(&self) -> Result<ProjectKey, ConfigError> {
        ProjectKey::new(self.tracker.project_key.trim())
            .ok_or_else(|| ConfigError::Invalid("tracker.project_key is empty".into()))
    }

    /// Resolves adapter settings, reading the token through `lookup`.
    pub fn tracker_settings(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<TrackerSettings, ConfigError> {
        let api_token = lookup(&self.tracker.token_env)
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingToken(self.tracker.token_env.clone()))?;
        Ok(TrackerSettings {
            base_url: self.tracker.base_url.clone(),
            project: self.project_key()?,
            email: self.tracker.email.clone(),
            api_token,
            fields: self.tracker.fields.clone(),
            timeout: Duration::from_secs(self.tracker.timeout_secs),
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
