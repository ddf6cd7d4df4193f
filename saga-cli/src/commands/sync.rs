// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync Command
//!
//! Reconcile the local contact store with the directory.

use anyhow::Result;

use crate::config::CliConfig;
use crate::display;

/// Runs the sync command.
pub fn run(config: &CliConfig) -> Result<()> {
    let service = super::open_service(config)?;
    let report = service.sync_contacts(&config.context())?;

    if config.json {
        return display::json(&report);
    }
    display::display_sync_report(&report);
    Ok(())
}
