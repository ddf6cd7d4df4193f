// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Saga CLI
//!
//! Command-line interface for Saga - directory contact sync and notifications.

mod commands;
mod config;
mod display;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::CliConfig;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "saga=info,saga_core=info";

#[derive(Parser)]
#[command(name = "saga")]
#[command(version, about = "Enterprise directory contact sync and notifications")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: <config dir>/saga/config.json)
    #[arg(long, global = true, env = "SAGA_CONFIG")]
    config: Option<PathBuf>,

    /// Abort the run after this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the local contact store with the directory
    Sync,

    /// Compare the store with the directory without changing anything
    Analyze,

    /// Send a text notification to contacts by name
    Push {
        /// Recipient display name (repeatable)
        #[arg(long = "to", required = true, value_name = "NAME")]
        to: Vec<String>,

        /// Message content
        content: String,
    },

    /// Queue a request to make the application visible to a user
    RequireVisible {
        /// Directory user ID
        user_id: String,
    },

    /// Check whether a visibility request is pending for a user
    CheckVisible {
        /// Directory user ID
        user_id: String,
    },

    /// List contacts in the local store
    Contacts,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = CliConfig {
        config_path: cli.config.unwrap_or_else(config::default_config_path),
        timeout_secs: cli.timeout,
        json: cli.json,
    };

    match cli.command {
        Commands::Sync => commands::sync::run(&config)?,
        Commands::Analyze => commands::analyze::run(&config)?,
        Commands::Push { to, content } => commands::push::run(&config, &to, &content)?,
        Commands::RequireVisible { user_id } => {
            commands::visibility::require(&config, &user_id)?;
        }
        Commands::CheckVisible { user_id } => {
            commands::visibility::check(&config, &user_id)?;
        }
        Commands::Contacts => commands::contacts::list(&config)?,
    }

    Ok(())
}
