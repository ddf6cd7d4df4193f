// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Visibility Commands
//!
//! Queue and inspect pending visibility requests.

use anyhow::Result;
use serde_json::json;

use crate::config::CliConfig;
use crate::display;

/// Queues a visibility request for `user_id`.
pub fn require(config: &CliConfig, user_id: &str) -> Result<()> {
    let service = super::open_service(config)?;
    service.add_require_visible(&config.context(), user_id)?;

    if config.json {
        return display::json(&json!({ "user_id": user_id, "pending": true }));
    }
    display::success(&format!("Visibility requested for {}", user_id));
    display::info("It takes effect once the directory confirms it on the next sync");
    Ok(())
}

/// Reports whether a visibility request for `user_id` is pending.
pub fn check(config: &CliConfig, user_id: &str) -> Result<()> {
    let service = super::open_service(config)?;
    let pending = service.already_in_cache(&config.context(), user_id)?;

    if config.json {
        return display::json(&json!({ "user_id": user_id, "pending": pending }));
    }
    if pending {
        display::info(&format!("Visibility request for {} is pending", user_id));
    } else {
        display::info(&format!("No pending visibility request for {}", user_id));
    }
    Ok(())
}
