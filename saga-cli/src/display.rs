// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Display Helpers
//!
//! Terminal output formatting and styling.

use anyhow::Result;
use console::style;
use saga_core::{ContactAnalysis, ContactInfo, PushReport, SyncReport};
use serde::Serialize;

/// Prints a success message.
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Prints a warning message.
pub fn warning(msg: &str) {
    println!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Prints an info message.
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Prints any serializable value as pretty JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn id_list(ids: &[String]) -> String {
    ids.join(", ")
}

/// Displays the contacts in the store, one per line.
pub fn display_contacts(contacts: &[ContactInfo]) {
    for contact in contacts {
        let visible = if contact.visible_saga {
            style("visible").green()
        } else {
            style("hidden").dim()
        };
        let nick = if contact.nick_name.is_empty() {
            String::new()
        } else {
            format!("({})", contact.nick_name)
        };
        println!(
            "  {:10} {:20} {:16} {}",
            contact.user_id,
            style(&contact.user_name).bold(),
            nick,
            visible
        );
    }
}

/// Displays the outcome of a sync pass.
pub fn display_sync_report(report: &SyncReport) {
    if report.is_noop() {
        success(&format!(
            "Store already in sync ({} directory users)",
            report.fetched
        ));
        return;
    }

    success("Sync complete");
    println!("  fetched             {}", report.fetched);
    println!("  created             {}", report.created);
    println!("  updated             {}", report.updated);
    println!("  deleted             {}", report.deleted);
    println!("  visibility changed  {}", report.visibility_changed);
    println!("  pending confirmed   {}", report.pending_confirmed);
    println!("  pending dropped     {}", report.pending_dropped);
    if report.skipped > 0 {
        warning(&format!(
            "{} directory entries had no user ID and were skipped",
            report.skipped
        ));
    }
}

/// Displays the outcome of a message push.
pub fn display_push_report(report: &PushReport) {
    if !report.delivered.is_empty() {
        success(&format!("Delivered to {}", id_list(&report.delivered)));
    }
    if !report.pending_visible.is_empty() {
        info(&format!(
            "Not yet visible, queued for visibility: {}",
            id_list(&report.pending_visible)
        ));
    }
    if !report.unknown.is_empty() {
        warning(&format!("Unknown recipients: {}", id_list(&report.unknown)));
    }
    if !report.rejected.is_empty() {
        warning(&format!("Rejected by directory: {}", id_list(&report.rejected)));
    }
}

/// Displays a store/directory comparison.
pub fn display_analysis(analysis: &ContactAnalysis) {
    println!("  {}", style("Contact Analysis").bold().cyan());
    println!("  store contacts      {}", analysis.store_total);
    println!("  directory users     {}", analysis.directory_total);
    println!("  visible             {}", analysis.visible);
    println!("  not visible         {}", analysis.invisible);
    println!("  pending requests    {}", analysis.pending_visible);

    let sections = [
        ("Missing from store", &analysis.missing_from_store),
        ("No longer in directory", &analysis.stale_in_store),
        ("Names changed", &analysis.drifted),
        ("Visibility out of date", &analysis.visibility_drift),
    ];
    for (title, ids) in sections {
        if !ids.is_empty() {
            println!();
            println!("  {} ({}):", style(title).bold(), ids.len());
            for id in ids {
                println!("    {}", id);
            }
        }
    }

    println!();
    if analysis.is_in_sync() {
        success("Store matches the directory");
    } else {
        info("Run 'saga sync' to reconcile");
    }
}
