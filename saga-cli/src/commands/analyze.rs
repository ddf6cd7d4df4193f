// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Analyze Command

use anyhow::Result;

use crate::config::CliConfig;
use crate::display;

/// Runs the analyze command. Nothing is written.
pub fn run(config: &CliConfig) -> Result<()> {
    let service = super::open_service(config)?;
    let analysis = service.analysis_contacts(&config.context())?;

    if config.json {
        return display::json(&analysis);
    }
    display::display_analysis(&analysis);
    Ok(())
}
