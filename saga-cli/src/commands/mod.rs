// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI Commands

pub mod analyze;
pub mod contacts;
pub mod push;
pub mod sync;
pub mod visibility;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use saga_core::{FileVisibilityCache, HttpDirectoryClient, SagaConfig, Storage, SyncService};

use crate::config::CliConfig;

/// Service wired to the on-disk store and cache and the live directory.
pub type CliService = SyncService<FileVisibilityCache, HttpDirectoryClient>;

/// Opens the contact store, creating its parent directory if needed.
fn open_storage(path: &Path) -> Result<Storage> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
    }
    Storage::open(path).with_context(|| format!("cannot open store {}", path.display()))
}

/// Builds the service from the config file.
pub fn open_service(config: &CliConfig) -> Result<CliService> {
    let saga_config: SagaConfig = config.load()?;

    let storage = open_storage(&saga_config.database_path)?;
    let cache = FileVisibilityCache::new(&saga_config.cache_path)
        .with_context(|| format!("cannot open cache {}", saga_config.cache_path.display()))?;
    let directory = HttpDirectoryClient::new(&saga_config.directory)?;

    Ok(SyncService::new(storage, cache, directory))
}

/// Opens only the contact store, for commands that never reach the directory.
pub fn open_store(config: &CliConfig) -> Result<Storage> {
    let saga_config = config.load()?;
    open_storage(&saga_config.database_path)
}
