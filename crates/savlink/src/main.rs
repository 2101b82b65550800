// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Savlink - a customer-support chat and dashboard client.
//!
//! This is the binary entry point for the savlink client.

use clap::{Parser, Subcommand};
use colored::Colorize;
use savlink_core::Priority;

mod chat;
mod dashboard;

/// Savlink - a customer-support chat and dashboard client.
#[derive(Parser, Debug)]
#[command(name = "savlink", version, about, long_about = None)]
struct Cli {
    /// Log level for the savlink crates (error, warn, info, debug, trace).
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive support conversation.
    Chat,
    /// Show the support ticket dashboard.
    Dashboard {
        /// Keep only tickets with this priority (P0..P3).
        #[arg(long)]
        priority: Option<Priority>,
        /// Keep only tickets with this status (wire name, e.g. `pending`).
        #[arg(long)]
        status: Option<String>,
        /// Print one ticket's case file as JSON instead of the table.
        #[arg(long, value_name = "TICKET_ID")]
        dossier: Option<String>,
    },
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = match savlink_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            savlink_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Chat) | None => chat::run_chat(config).await,
        Some(Commands::Dashboard {
            priority,
            status,
            dossier,
        }) => dashboard::run_dashboard(config, priority, status.as_deref(), dossier.as_deref()).await,
        Some(Commands::Config) => print_config(&config),
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// Prints the resolved configuration as TOML.
fn print_config(config: &savlink_config::SavlinkConfig) -> Result<(), savlink_core::SavlinkError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| savlink_core::SavlinkError::Internal(format!("config render failed: {e}")))?;
    println!("{rendered}");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("savlink={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn dashboard_flags_parse() {
        let cli = Cli::parse_from(["savlink", "dashboard", "--priority", "P1", "--status", "pending"]);
        match cli.command {
            Some(Commands::Dashboard {
                priority, status, ..
            }) => {
                assert_eq!(priority, Some(Priority::P1));
                assert_eq!(status.as_deref(), Some("pending"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
