//! Configuration Management
//!
//! Handles persistent configuration storage for the command line tool.
//! Credentials are read from the environment and never written to disk.

use crate::docusign::client::{DEFAULT_ENVIRONMENT, DEFAULT_VERSION};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// DocuSign environment subdomain (`demo`, `www`, `na2`, ...)
    #[serde(default)]
    pub environment: Option<String>,
    /// REST API version path segment
    #[serde(default)]
    pub version: Option<String>,
    /// Default account id
    #[serde(default)]
    pub account_id: Option<String>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Config {
    /// Directory holding the config and log files
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("docusign-connect"))
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Get effective environment (CLI > env > config > default)
    pub fn effective_environment(&self, cli: Option<&str>) -> String {
        pick(cli, "DOCUSIGN_ENVIRONMENT", self.environment.as_deref())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
    }

    /// Get effective API version (CLI > env > config > default)
    pub fn effective_version(&self, cli: Option<&str>) -> String {
        pick(cli, "DOCUSIGN_API_VERSION", self.version.as_deref())
            .unwrap_or_else(|| DEFAULT_VERSION.to_string())
    }

    /// Get effective account id (CLI > env > config)
    pub fn effective_account_id(&self, cli: Option<&str>) -> Option<String> {
        pick(cli, "DOCUSIGN_ACCOUNT_ID", self.account_id.as_deref())
    }

    /// Remember the account id and save
    pub fn set_account_id(&mut self, account_id: &str) -> Result<()> {
        self.account_id = Some(account_id.to_string());
        self.save()
    }
}

fn pick(cli: Option<&str>, env_key: &str, stored: Option<&str>) -> Option<String> {
    cli.map(str::to_string)
        .or_else(|| std::env::var(env_key).ok())
        .or_else(|| stored.map(str::to_string))
        .filter(|v| !v.trim().is_empty())
}
