//! One-shot event listing command

use crate::client::FeedClient;
use crate::config::Config;
use anyhow::Result;
use console::style;
use feedwatch_core::{DirectionFilter, EventFeed, EventRow};

/// Fetch the event feed once and print it
pub async fn run(config: Config, filter: DirectionFilter, json: bool) -> Result<()> {
    let client = FeedClient::new(&config);

    let spinner = cliclack::spinner();
    spinner.start("Fetching events...");

    let events = match client.fetch_events().await {
        Ok(events) => {
            spinner.stop(format!("Fetched {} events", events.len()));
            events
        }
        Err(e) => {
            spinner.error("Fetch failed");
            // Same surface as the dashboard: the error message is the output.
            println!("{}", style(format!("Error loading events: {}", e)).red());
            return Ok(());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    let mut feed = EventFeed::new();
    feed.apply(events);
    feed.set_filter(filter);

    let stats = feed.stats();
    println!(
        "{} {}  {} {}  {} {}  {} {}",
        style("total").dim(),
        stats.total,
        style("incoming").green(),
        stats.incoming,
        style("outgoing").blue(),
        stats.outgoing,
        style("errors").red(),
        stats.error,
    );
    println!();

    for row in feed.rows() {
        match row {
            EventRow::Entry {
                direction,
                kind,
                timestamp,
                ..
            } => {
                println!(
                    "{:<9} {:<24} {}",
                    style(direction.as_str()).cyan(),
                    kind,
                    style(timestamp).dim()
                );
            }
            EventRow::Empty => println!("{}", style("No events to display").dim()),
            EventRow::Error(message) => println!("{}", style(message).red()),
        }
    }

    Ok(())
}
