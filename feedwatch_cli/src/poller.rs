//! Periodic fetch scheduling
//!
//! Each feed gets its own fixed-interval poller, started once and stopped
//! explicitly (or on drop). The pollers never coordinate with each other or
//! with user input; fetch results arrive on a channel in completion order.

use crate::client::FeedClient;
use feedwatch_core::{Event, LogRecord};
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Fetch results delivered to the dashboard
#[derive(Debug)]
pub enum FeedMessage {
    Events(Vec<Event>),
    EventsFailed(String),
    Logs(Vec<LogRecord>),
    LogsFailed(String),
}

/// Handle for a recurring scheduled task
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    /// Start ticking immediately and then once per `period`.
    ///
    /// Each tick body is spawned rather than awaited, so a fetch slower than
    /// the period overlaps the next one and results land in completion order.
    pub fn start<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tokio::spawn(tick());
            }
        });
        Self { handle }
    }

    /// Stop the schedule. In-flight fetches are not aborted.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start the event feed poller
pub fn start_event_poller(
    client: FeedClient,
    period: Duration,
    tx: mpsc::Sender<FeedMessage>,
) -> Poller {
    Poller::start(period, move || {
        let client = client.clone();
        let tx = tx.clone();
        async move {
            let message = match client.fetch_events().await {
                Ok(events) => FeedMessage::Events(events),
                Err(e) => FeedMessage::EventsFailed(e.to_string()),
            };
            let _ = tx.send(message).await;
        }
    })
}

/// Start the log feed poller
pub fn start_log_poller(
    client: FeedClient,
    period: Duration,
    tx: mpsc::Sender<FeedMessage>,
) -> Poller {
    Poller::start(period, move || {
        let client = client.clone();
        let tx = tx.clone();
        async move {
            let message = match client.fetch_logs().await {
                Ok(logs) => FeedMessage::Logs(logs),
                Err(e) => FeedMessage::LogsFailed(e.to_string()),
            };
            let _ = tx.send(message).await;
        }
    })
}
