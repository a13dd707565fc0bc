//! One-shot log listing command

use crate::client::FeedClient;
use crate::config::Config;
use anyhow::{Context, Result};
use console::style;
use feedwatch_core::{LogFeed, LogFilters, LogKind, LogStatus};

/// Fetch the log feed once and print the visible entries
pub async fn run(config: Config, filters: LogFilters, json: bool) -> Result<()> {
    let client = FeedClient::new(&config);

    let spinner = cliclack::spinner();
    spinner.start("Fetching logs...");

    let logs = match client.fetch_logs().await {
        Ok(logs) => {
            spinner.stop(format!("Fetched {} log entries", logs.len()));
            logs
        }
        Err(e) => {
            spinner.error("Fetch failed");
            return Err(e).context("Failed to fetch logs");
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&logs)?);
        return Ok(());
    }

    let mut feed = LogFeed::new();
    feed.apply(logs);
    feed.filters = filters;

    let stats = feed.stats();
    println!(
        "{} {}  {} {}  {} {}",
        style("requests").yellow(),
        stats.requests,
        style("success").green(),
        stats.successes,
        style("errors").red(),
        stats.errors,
    );

    for row in feed.visible_rows() {
        println!();
        let tag = match (row.kind, row.status) {
            (LogKind::Request, _) => style("Request").yellow(),
            (LogKind::Response, LogStatus::Error) => style("Error").red(),
            (LogKind::Response, _) => style("Response").green(),
        };
        println!(
            "{} {}  {}",
            style(format!("#{}", row.id)).cyan(),
            tag,
            style(&row.timestamp).dim()
        );
        println!("{}", style(&row.summary).bold());

        for section in &row.sections {
            println!("  {}", style(&section.label).dim());
            for line in section.body.lines() {
                println!("    {}", line);
            }
        }
    }

    Ok(())
}
