// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI Configuration

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use saga_core::{SagaConfig, SyncContext};

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Path of the JSON config file.
    pub config_path: PathBuf,
    /// Overall time limit for the command, if any.
    pub timeout_secs: Option<u64>,
    /// Emit JSON instead of formatted text.
    pub json: bool,
}

/// Returns the config path used when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("saga")
        .join("config.json")
}

impl CliConfig {
    /// Loads and validates the Saga configuration file.
    pub fn load(&self) -> Result<SagaConfig> {
        SagaConfig::from_file(&self.config_path)
            .with_context(|| format!("failed to load {}", self.config_path.display()))
    }

    /// Builds the context that bounds this command.
    pub fn context(&self) -> SyncContext {
        match self.timeout_secs {
            Some(secs) => SyncContext::with_timeout(Duration::from_secs(secs)),
            None => SyncContext::background(),
        }
    }
}
