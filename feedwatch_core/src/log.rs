//! Log feed: request/response records, tallies, sorting and detail rows

use crate::pretty_json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of a log record (wire field `type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Request,
    Response,
}

/// Outcome status. Meaningful mainly for responses; requests usually carry
/// it too but it does not drive their visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Success,
    Error,
    #[serde(other)]
    #[default]
    Unknown,
}

/// A single record from `GET /api/logs`: one request or one response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: i64,

    #[serde(rename = "type")]
    pub kind: LogKind,

    #[serde(default)]
    pub status: LogStatus,

    /// Display-only timestamp, passed through verbatim.
    #[serde(default)]
    pub timestamp: String,

    // Request-side fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,

    // Response-side field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

/// Aggregate counters over a log collection.
///
/// The three counts are independent predicates, not a partition: a record
/// can satisfy more than one or none, and they need not sum to the length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogStats {
    pub requests: usize,
    pub successes: usize,
    pub errors: usize,
}

impl LogStats {
    pub fn compute(records: &[LogRecord]) -> Self {
        Self {
            requests: records.iter().filter(|r| r.kind == LogKind::Request).count(),
            successes: records
                .iter()
                .filter(|r| r.status == LogStatus::Success)
                .count(),
            errors: records
                .iter()
                .filter(|r| r.status == LogStatus::Error)
                .count(),
        }
    }
}

/// Stable sort by id descending, newest first. Full re-sort on every fetch.
pub fn sort_newest_first(records: &mut [LogRecord]) {
    records.sort_by(|a, b| b.id.cmp(&a.id));
}

/// One labelled, pretty-printed payload block under a log row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSection {
    pub label: String,
    pub body: String,
}

/// Declarative description of one rendered log entry. Always expanded;
/// there is no collapse affordance on this feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub id: i64,
    pub kind: LogKind,
    pub status: LogStatus,
    pub timestamp: String,
    pub summary: String,
    pub sections: Vec<DetailSection>,
}

impl LogRow {
    pub fn from_record(record: &LogRecord) -> Self {
        let (summary, sections) = match record.kind {
            LogKind::Request => Self::request_parts(record),
            LogKind::Response => Self::response_parts(record),
        };

        Self {
            id: record.id,
            kind: record.kind,
            status: record.status,
            timestamp: record.timestamp.clone(),
            summary,
            sections,
        }
    }

    fn request_parts(record: &LogRecord) -> (String, Vec<DetailSection>) {
        let method = record.method.as_deref().unwrap_or("");
        let endpoint = record.endpoint.as_deref().unwrap_or("");

        let mut summary = format!("{method} {endpoint}");
        if endpoint == "/webhook" {
            if let Some(signal) = record.data.as_ref().and_then(signal_label) {
                summary.push_str(&format!(" - Signal: {signal}"));
            }
        }

        let mut sections = vec![DetailSection {
            label: "Method / Endpoint".to_string(),
            body: format!("{method} {endpoint}"),
        }];
        if let Some(data) = &record.data {
            sections.push(DetailSection {
                label: "Request Data".to_string(),
                body: pretty_json(data),
            });
        }
        if let Some(params) = &record.params {
            sections.push(DetailSection {
                label: "Request Parameters".to_string(),
                body: pretty_json(params),
            });
        }

        (summary, sections)
    }

    fn response_parts(record: &LogRecord) -> (String, Vec<DetailSection>) {
        let summary = if record.status == LogStatus::Error {
            "Error Response".to_string()
        } else {
            "Success Response".to_string()
        };

        let body = record
            .response
            .as_ref()
            .map(pretty_json)
            .unwrap_or_else(|| "null".to_string());

        let sections = vec![DetailSection {
            label: "Response Data".to_string(),
            body,
        }];

        (summary, sections)
    }
}

/// Extract a displayable `signal` value from a webhook payload.
/// Only scalars count; an object or array signal is ignored.
fn signal_label(data: &Value) -> Option<String> {
    match data.get("signal")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Three independent show/hide toggles over already-built rows.
///
/// Visibility is a per-row predicate, not a rebuild: request rows are
/// governed solely by `show_requests`; error responses by `show_errors`;
/// every other response by `show_responses`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogFilters {
    pub show_requests: bool,
    pub show_responses: bool,
    pub show_errors: bool,
}

impl Default for LogFilters {
    fn default() -> Self {
        Self {
            show_requests: true,
            show_responses: true,
            show_errors: true,
        }
    }
}

impl LogFilters {
    pub fn is_visible(&self, row: &LogRow) -> bool {
        match row.kind {
            LogKind::Request => self.show_requests,
            LogKind::Response => {
                if row.status == LogStatus::Error {
                    self.show_errors
                } else {
                    self.show_responses
                }
            }
        }
    }
}

/// Component-local state for the log dashboard.
///
/// A failed poll never touches this state: prior rows stay rendered and the
/// failure goes to the diagnostic channel only. (Deliberate asymmetry with
/// the event feed, which blanks its list on failure.)
#[derive(Debug, Default)]
pub struct LogFeed {
    records: Vec<LogRecord>,
    pub filters: LogFilters,
}

impl LogFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn stats(&self) -> LogStats {
        LogStats::compute(&self.records)
    }

    /// Replace the snapshot with a freshly fetched collection and sort it
    /// newest first.
    pub fn apply(&mut self, mut records: Vec<LogRecord>) {
        sort_newest_first(&mut records);
        self.records = records;
    }

    /// Build every row, visible or not. Callers apply `filters` per row.
    pub fn rows(&self) -> Vec<LogRow> {
        self.records.iter().map(LogRow::from_record).collect()
    }

    /// Rows that pass the current toggles.
    pub fn visible_rows(&self) -> Vec<LogRow> {
        self.rows()
            .into_iter()
            .filter(|r| self.filters.is_visible(r))
            .collect()
    }
}
