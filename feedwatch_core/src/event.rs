//! Event feed: direction tallies, filtering and expandable rows

use crate::pretty_json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Direction of an event as reported by the backend.
///
/// Anything outside the three known values lands in `Unknown`: such events
/// still render under the "all" filter but match no tally bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    Outgoing,
    Error,
    #[serde(other)]
    Unknown,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Incoming => "incoming",
            Direction::Outgoing => "outgoing",
            Direction::Error => "error",
            Direction::Unknown => "unknown",
        }
    }
}

/// A single event record from `GET /api/events`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub direction: Direction,

    /// Event type label (wire field `type`).
    #[serde(rename = "type")]
    pub kind: String,

    /// Display-only timestamp, passed through verbatim.
    #[serde(default)]
    pub timestamp: String,

    /// Opaque structured payload.
    #[serde(default)]
    pub data: Value,
}

/// Active direction filter. Exactly one is selected at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectionFilter {
    #[default]
    All,
    Incoming,
    Outgoing,
    Error,
}

impl DirectionFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectionFilter::All => "all",
            DirectionFilter::Incoming => "incoming",
            DirectionFilter::Outgoing => "outgoing",
            DirectionFilter::Error => "error",
        }
    }

    /// Whether an event passes this filter.
    pub fn matches(&self, direction: Direction) -> bool {
        match self {
            DirectionFilter::All => true,
            DirectionFilter::Incoming => direction == Direction::Incoming,
            DirectionFilter::Outgoing => direction == Direction::Outgoing,
            DirectionFilter::Error => direction == Direction::Error,
        }
    }
}

impl std::str::FromStr for DirectionFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(DirectionFilter::All),
            "incoming" => Ok(DirectionFilter::Incoming),
            "outgoing" => Ok(DirectionFilter::Outgoing),
            "error" => Ok(DirectionFilter::Error),
            other => Err(format!("unknown filter: {other}")),
        }
    }
}

/// Aggregate counters over an event collection.
///
/// `total` counts every record; the three buckets count only recognized
/// directions, so their sum can fall short of `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventStats {
    pub total: usize,
    pub incoming: usize,
    pub outgoing: usize,
    pub error: usize,
}

impl EventStats {
    pub fn compute(events: &[Event]) -> Self {
        let count = |d: Direction| events.iter().filter(|e| e.direction == d).count();
        Self {
            total: events.len(),
            incoming: count(Direction::Incoming),
            outgoing: count(Direction::Outgoing),
            error: count(Direction::Error),
        }
    }
}

/// Declarative description of one rendered line in the event list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventRow {
    Entry {
        direction: Direction,
        kind: String,
        timestamp: String,
        /// Pretty-printed payload when the row is expanded.
        expanded: Option<String>,
    },
    /// "No events to display" placeholder.
    Empty,
    /// Fetch failure message replacing the whole list.
    Error(String),
}

/// Component-local state for the event dashboard.
///
/// Holds the latest snapshot, the active filter and the expansion set.
/// Row identity for expansion is the position in the currently rendered
/// filtered list; every re-render (new snapshot or filter change) collapses
/// everything again.
#[derive(Debug, Default)]
pub struct EventFeed {
    events: Vec<Event>,
    filter: DirectionFilter,
    expanded: HashSet<usize>,
    last_error: Option<String>,
}

impl EventFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn filter(&self) -> DirectionFilter {
        self.filter
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn stats(&self) -> EventStats {
        EventStats::compute(&self.events)
    }

    /// Replace the snapshot with a freshly fetched collection.
    ///
    /// No merge or diff against the previous snapshot; the fetch fully
    /// replaces it. Clears any earlier fetch error and all expansion state.
    pub fn apply(&mut self, events: Vec<Event>) {
        self.events = events;
        self.last_error = None;
        self.expanded.clear();
    }

    /// Record a failed poll. The next render shows only the error message,
    /// replacing all prior content.
    pub fn fetch_failed(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
        self.expanded.clear();
    }

    /// Switch the active filter and collapse all rows. No refetch.
    pub fn set_filter(&mut self, filter: DirectionFilter) {
        self.filter = filter;
        self.expanded.clear();
    }

    /// Number of entry rows the current filter yields.
    pub fn visible_len(&self) -> usize {
        self.events
            .iter()
            .filter(|e| self.filter.matches(e.direction))
            .count()
    }

    /// Toggle expansion of the row at `index` in the filtered list.
    /// Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.visible_len() {
            return;
        }
        if !self.expanded.remove(&index) {
            self.expanded.insert(index);
        }
    }

    /// Build the display list for the current snapshot and filter.
    pub fn rows(&self) -> Vec<EventRow> {
        if let Some(err) = &self.last_error {
            return vec![EventRow::Error(format!("Error loading events: {err}"))];
        }

        let rows: Vec<EventRow> = self
            .events
            .iter()
            .filter(|e| self.filter.matches(e.direction))
            .enumerate()
            .map(|(i, e)| EventRow::Entry {
                direction: e.direction,
                kind: e.kind.clone(),
                timestamp: e.timestamp.clone(),
                expanded: self.expanded.contains(&i).then(|| pretty_json(&e.data)),
            })
            .collect();

        if rows.is_empty() {
            vec![EventRow::Empty]
        } else {
            rows
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(direction: Direction, kind: &str) -> Event {
        Event {
            direction,
            kind: kind.to_string(),
            timestamp: "2024-01-01 00:00:00".to_string(),
            data: json!({"n": 1}),
        }
    }

    fn sample() -> Vec<Event> {
        vec![
            event(Direction::Incoming, "webhook"),
            event(Direction::Outgoing, "order"),
            event(Direction::Incoming, "webhook"),
            event(Direction::Error, "order_failed"),
        ]
    }

    #[test]
    fn test_direction_parses_unknown_values() {
        let e: Event =
            serde_json::from_value(json!({"direction": "sideways", "type": "x"})).unwrap();
        assert_eq!(e.direction, Direction::Unknown);
    }

    #[test]
    fn test_stats_total_matches_length() {
        let events = sample();
        let stats = EventStats::compute(&events);
        assert_eq!(stats.total, events.len());
        assert_eq!(stats.incoming, 2);
        assert_eq!(stats.outgoing, 1);
        assert_eq!(stats.error, 1);
        assert_eq!(stats.incoming + stats.outgoing + stats.error, stats.total);
    }

    #[test]
    fn test_stats_unknown_counts_toward_total_only() {
        let mut events = sample();
        events.push(event(Direction::Unknown, "mystery"));
        let stats = EventStats::compute(&events);
        assert_eq!(stats.total, 5);
        assert!(stats.incoming + stats.outgoing + stats.error < stats.total);
    }

    #[test]
    fn test_rows_all_filter_shows_everything() {
        let mut feed = EventFeed::new();
        feed.apply(sample());
        assert_eq!(feed.rows().len(), 4);
    }

    #[test]
    fn test_rows_empty_shows_placeholder() {
        let feed = EventFeed::new();
        assert_eq!(feed.rows(), vec![EventRow::Empty]);
    }

    #[test]
    fn test_filtered_rows_keep_original_order() {
        let mut feed = EventFeed::new();
        feed.apply(sample());
        feed.set_filter(DirectionFilter::Incoming);

        let rows = feed.rows();
        assert_eq!(rows.len(), 2);
        for row in &rows {
            match row {
                EventRow::Entry { direction, kind, .. } => {
                    assert_eq!(*direction, Direction::Incoming);
                    assert_eq!(kind, "webhook");
                }
                other => panic!("unexpected row: {other:?}"),
            }
        }
    }

    #[test]
    fn test_filter_with_no_matches_shows_placeholder() {
        let mut feed = EventFeed::new();
        feed.apply(vec![event(Direction::Incoming, "webhook")]);
        feed.set_filter(DirectionFilter::Error);
        assert_eq!(feed.rows(), vec![EventRow::Empty]);
    }

    #[test]
    fn test_unknown_direction_renders_under_all_only() {
        let mut feed = EventFeed::new();
        feed.apply(vec![event(Direction::Unknown, "mystery")]);
        assert_eq!(feed.rows().len(), 1);
        feed.set_filter(DirectionFilter::Incoming);
        assert_eq!(feed.rows(), vec![EventRow::Empty]);
    }

    #[test]
    fn test_toggle_affects_only_that_row() {
        let mut feed = EventFeed::new();
        feed.apply(sample());
        feed.toggle(1);

        let rows = feed.rows();
        for (i, row) in rows.iter().enumerate() {
            let EventRow::Entry { expanded, .. } = row else {
                panic!("unexpected row");
            };
            assert_eq!(expanded.is_some(), i == 1);
        }

        // Toggling again collapses it.
        feed.toggle(1);
        assert!(feed.rows().iter().all(|r| matches!(
            r,
            EventRow::Entry { expanded: None, .. }
        )));
    }

    #[test]
    fn test_toggle_out_of_range_is_ignored() {
        let mut feed = EventFeed::new();
        feed.apply(sample());
        feed.toggle(99);
        assert!(feed.rows().iter().all(|r| matches!(
            r,
            EventRow::Entry { expanded: None, .. }
        )));
    }

    #[test]
    fn test_rerender_resets_expansion() {
        let mut feed = EventFeed::new();
        feed.apply(sample());
        feed.toggle(0);

        // A filter change collapses everything.
        feed.set_filter(DirectionFilter::All);
        assert!(feed.rows().iter().all(|r| matches!(
            r,
            EventRow::Entry { expanded: None, .. }
        )));

        // A new snapshot does too.
        feed.toggle(0);
        feed.apply(sample());
        assert!(feed.rows().iter().all(|r| matches!(
            r,
            EventRow::Entry { expanded: None, .. }
        )));
    }

    #[test]
    fn test_fetch_failure_replaces_list_with_message() {
        let mut feed = EventFeed::new();
        feed.apply(sample());
        feed.fetch_failed("connection refused");

        let rows = feed.rows();
        assert_eq!(rows.len(), 1);
        match &rows[0] {
            EventRow::Error(msg) => assert!(msg.contains("connection refused")),
            other => panic!("unexpected row: {other:?}"),
        }

        // The next successful poll recovers.
        feed.apply(sample());
        assert_eq!(feed.rows().len(), 4);
    }
}
