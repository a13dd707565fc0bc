//! Feedwatch Core - Feed models and pipeline logic for the dashboard
//!
//! This crate contains the event/log data models, the aggregate counters,
//! and the declarative row building used by the CLI. It performs no I/O:
//! fetching and rendering live in `feedwatch_cli`.

pub mod event;
pub mod log;

pub use event::{Direction, DirectionFilter, Event, EventFeed, EventRow, EventStats};
pub use log::{
    sort_newest_first, DetailSection, LogFeed, LogFilters, LogKind, LogRecord, LogRow, LogStats,
    LogStatus,
};

use serde_json::Value;
use thiserror::Error;

/// Fetch errors
///
/// The three failure classes a poll cycle can hit. Both feeds treat them
/// uniformly; they differ only in what the caller does with the failure.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("server returned HTTP {status}")]
    Http { status: u16 },

    #[error("invalid JSON body: {0}")]
    Parse(String),
}

/// Pretty-print a JSON payload for display (2-space indent).
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_json_indents() {
        let value = json!({"signal": "buy", "qty": 10});
        let text = pretty_json(&value);
        assert!(text.contains("\n"));
        assert!(text.contains("  \"signal\": \"buy\""));
    }

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(
            FetchError::Http { status: 503 }.to_string(),
            "server returned HTTP 503"
        );
        assert!(FetchError::Network("connection refused".into())
            .to_string()
            .contains("connection refused"));
    }
}
