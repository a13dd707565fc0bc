//! Feedwatch CLI - Terminal dashboard for the webhook backend feeds
//!
//! Usage:
//!   feedwatch watch             Live dashboard (events + logs)
//!   feedwatch events            Fetch and print the event feed once
//!   feedwatch logs              Fetch and print the log feed once

mod client;
mod commands;
mod config;
mod poller;
mod tui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use feedwatch_core::LogFilters;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "feedwatch")]
#[command(author = "Feedwatch Team")]
#[command(version)]
#[command(about = "Terminal dashboard for the event and log feeds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Backend base URL (overrides the config file)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Poll interval in milliseconds (overrides the config file)
    #[arg(long, global = true)]
    interval: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Live dashboard polling both feeds
    Watch,

    /// Fetch the event feed once and print it
    Events {
        /// Direction filter
        #[arg(
            short,
            long,
            default_value = "all",
            value_parser = ["all", "incoming", "outgoing", "error"]
        )]
        filter: String,

        /// Print raw records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch the log feed once and print it
    Logs {
        /// Hide request entries
        #[arg(long)]
        no_requests: bool,

        /// Hide success response entries
        #[arg(long)]
        no_responses: bool,

        /// Hide error response entries
        #[arg(long)]
        no_errors: bool,

        /// Print raw records as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},feedwatch_cli=info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    // Ensure config directories exist
    config::ensure_dirs()?;

    let config = config::Config::load()?.with_overrides(cli.server, cli.interval);

    // Handle commands
    match cli.command {
        Commands::Watch => {
            commands::watch::run(config).await?;
        }

        Commands::Events { filter, json } => {
            let filter = filter.parse().unwrap_or_default();
            commands::events::run(config, filter, json).await?;
        }

        Commands::Logs {
            no_requests,
            no_responses,
            no_errors,
            json,
        } => {
            let filters = LogFilters {
                show_requests: !no_requests,
                show_responses: !no_responses,
                show_errors: !no_errors,
            };
            commands::logs::run(config, filters, json).await?;
        }
    }

    Ok(())
}
