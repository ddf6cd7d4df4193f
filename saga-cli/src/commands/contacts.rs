// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contacts Command
//!
//! List the local contact store.

use anyhow::Result;

use crate::config::CliConfig;
use crate::display;

/// Lists all stored contacts.
pub fn list(config: &CliConfig) -> Result<()> {
    let storage = super::open_store(config)?;
    let contacts = storage.list_contacts()?;

    if config.json {
        return display::json(&contacts);
    }

    if contacts.is_empty() {
        display::info("No contacts yet. Populate the store with:");
        println!("  saga sync");
        return Ok(());
    }

    println!();
    println!("Contacts ({}):", contacts.len());
    println!();
    display::display_contacts(&contacts);
    println!();

    Ok(())
}
