//! Configuration loading and management
//!
//! Handles parsing of `.taskdash.toml` configuration files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = ".taskdash.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Task service configuration
    #[serde(default)]
    pub service: ServiceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
        }
    }
}

/// Task service connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the task service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from a `.taskdash.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Resolve the config for a CLI invocation: explicit path, or the
    /// working directory's file, or defaults.
    pub fn resolve(explicit: Option<&PathBuf>) -> crate::error::Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let cwd = std::env::current_dir()?;
                Ok(Self::load_from_dir(&cwd))
            }
        }
    }

    fn validate(&self) -> crate::error::Result<()> {
        self.service.validate()
    }
}

impl ServiceConfig {
    pub(crate) fn validate(&self) -> crate::error::Result<()> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "service.base_url cannot be empty".to_string(),
            ));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(crate::error::Error::InvalidConfig(
                "service.base_url must start with http:// or https://".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "service.timeout_secs must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}
