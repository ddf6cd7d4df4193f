// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration
//!
//! Loaded once at process start from a JSON file. The directory secret may
//! be supplied through `SAGA_CORP_SECRET` instead of the file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable that overrides `directory.corp_secret`.
pub const CORP_SECRET_ENV: &str = "SAGA_CORP_SECRET";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SagaConfig {
    /// SQLite contact database
    pub database_path: PathBuf,

    /// JSON file holding pending visibility requests
    pub cache_path: PathBuf,

    /// Directory API settings
    pub directory: DirectoryConfig,
}

impl Default for SagaConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("saga.db"),
            cache_path: PathBuf::from("require_visible.json"),
            directory: DirectoryConfig::default(),
        }
    }
}

/// Settings for the enterprise directory API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// API root (e.g., "https://qyapi.weixin.qq.com/cgi-bin")
    pub api_base_url: String,

    /// Corporation ID
    pub corp_id: String,

    /// Application secret
    pub corp_secret: String,

    /// Application (agent) ID used for visibility and message push
    pub agent_id: i64,

    /// Department whose members (recursively) form the contact list
    pub department_id: i64,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Proxy URL
    pub proxy_url: Option<String>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://qyapi.weixin.qq.com/cgi-bin".to_string(),
            corp_id: String::new(),
            corp_secret: String::new(),
            agent_id: 0,
            department_id: 1,
            timeout_secs: 30,
            proxy_url: None,
        }
    }
}

impl DirectoryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks the fields the HTTP client cannot work without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("directory.api_base_url is empty".into()));
        }
        if self.corp_id.trim().is_empty() {
            return Err(ConfigError::Invalid("directory.corp_id is empty".into()));
        }
        if self.corp_secret.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "directory.corp_secret is empty (set it in the file or {})",
                CORP_SECRET_ENV
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("directory.timeout_secs must be > 0".into()));
        }
        Ok(())
    }
}

impl SagaConfig {
    /// Loads and validates configuration from `path`.
    ///
    /// Relative store and cache paths are resolved against the config
    /// file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json(&data)?;

        if let Some(base) = path.parent() {
            config.database_path = resolve(base, &config.database_path);
            config.cache_path = resolve(base, &config.cache_path);
        }

        if let Ok(secret) = std::env::var(CORP_SECRET_ENV) {
            if !secret.is_empty() {
                config.directory.corp_secret = secret;
            }
        }

        config.directory.validate()?;
        Ok(config)
    }

    /// Parses configuration without validating it.
    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
