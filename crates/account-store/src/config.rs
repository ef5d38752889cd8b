//! Provider configuration
//!
//! YAML configuration for the sled-backed provider:
//!
//! ```yaml
//! version: "1"
//! storage:
//!   path: /var/lib/accounts/db
//! ```
//!
//! A temporary database (tests, throwaway environments) is requested with
//! `temporary: true` instead of a path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use account_actions::StoreError;

use crate::backend::SledStore;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to parse YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// The configured store could not be opened
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Root configuration for the storage provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Configuration version
    pub version: String,

    /// Storage backend settings
    pub storage: StorageSettings,
}

/// Settings for the sled backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// On-disk database location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Keep the database in memory and discard it on drop
    #[serde(default)]
    pub temporary: bool,
}

impl StoreConfig {
    /// Parse a configuration from YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Open the configured sled store
    pub fn open(&self) -> Result<SledStore> {
        self.validate()?;
        Ok(SledStore::from_config(self)?)
    }

    /// Check the configuration for contradictions
    fn validate(&self) -> Result<()> {
        if self.version != "1" {
            return Err(ConfigError::Validation(format!(
                "unsupported version '{}'",
                self.version
            )));
        }

        match (&self.storage.path, self.storage.temporary) {
            (Some(_), true) => Err(ConfigError::Validation(
                "'path' and 'temporary' are mutually exclusive".to_string(),
            )),
            (None, false) => Err(ConfigError::Validation(
                "either 'path' or 'temporary: true' is required".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
