// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Push Command
//!
//! Send a text notification to contacts by display name.

use anyhow::Result;

use crate::config::CliConfig;
use crate::display;

/// Sends `content` to every contact named in `to`.
pub fn run(config: &CliConfig, to: &[String], content: &str) -> Result<()> {
    let service = super::open_service(config)?;
    let report = service.push_msg(&config.context(), to, content)?;

    if config.json {
        return display::json(&report);
    }
    display::display_push_report(&report);
    Ok(())
}
