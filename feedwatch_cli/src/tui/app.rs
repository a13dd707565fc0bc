//! Dashboard application state and event handling

use crate::poller::FeedMessage;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use feedwatch_core::{DirectionFilter, EventFeed, LogFeed};

/// Dashboard view modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Events,
    Logs,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Events => "events",
            View::Logs => "logs",
        }
    }
}

/// Dashboard application state
///
/// The two feeds are independent: each has its own poller, its own snapshot
/// and its own failure handling. A failed event poll blanks the event list
/// with the error message; a failed log poll only logs a warning and keeps
/// the stale rows.
pub struct DashboardApp {
    pub view: View,
    pub events: EventFeed,
    pub logs: LogFeed,
    /// Selected row in the event list (expansion target).
    pub selected: usize,
    /// Scroll offset in the log list.
    pub log_scroll: usize,
    pub events_refreshed_at: Option<DateTime<Local>>,
    pub logs_refreshed_at: Option<DateTime<Local>>,
    pub should_quit: bool,
}

impl DashboardApp {
    pub fn new() -> Self {
        Self {
            view: View::Events,
            events: EventFeed::new(),
            logs: LogFeed::new(),
            selected: 0,
            log_scroll: 0,
            events_refreshed_at: None,
            logs_refreshed_at: None,
            should_quit: false,
        }
    }

    /// Handle a fetch result from either poller
    pub fn handle_message(&mut self, message: FeedMessage) {
        match message {
            FeedMessage::Events(events) => {
                self.events.apply(events);
                self.clamp_selection();
                self.events_refreshed_at = Some(Local::now());
            }
            FeedMessage::EventsFailed(message) => {
                self.events.fetch_failed(message);
                self.selected = 0;
            }
            FeedMessage::Logs(logs) => {
                self.logs.apply(logs);
                self.logs_refreshed_at = Some(Local::now());
            }
            FeedMessage::LogsFailed(message) => {
                // Stale rows stay rendered; the failure is diagnostic only.
                tracing::warn!("Failed to fetch logs: {}", message);
            }
        }
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            // Quit
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            // Switch between the two feeds
            (KeyCode::Tab, _) => {
                self.view = match self.view {
                    View::Events => View::Logs,
                    View::Logs => View::Events,
                };
            }
            // Event direction filters
            (KeyCode::Char('a'), _) if self.view == View::Events => {
                self.set_filter(DirectionFilter::All);
            }
            (KeyCode::Char('i'), _) if self.view == View::Events => {
                self.set_filter(DirectionFilter::Incoming);
            }
            (KeyCode::Char('o'), _) if self.view == View::Events => {
                self.set_filter(DirectionFilter::Outgoing);
            }
            (KeyCode::Char('e'), _) if self.view == View::Events => {
                self.set_filter(DirectionFilter::Error);
            }
            // Event list navigation and expansion
            (KeyCode::Up | KeyCode::Char('k'), _) if self.view == View::Events => {
                self.selected = self.selected.saturating_sub(1);
            }
            (KeyCode::Down | KeyCode::Char('j'), _) if self.view == View::Events => {
                self.selected = (self.selected + 1)
                    .min(self.events.visible_len().saturating_sub(1));
            }
            (KeyCode::Enter, _) if self.view == View::Events => {
                self.events.toggle(self.selected);
            }
            // Log category toggles
            (KeyCode::Char('r'), _) if self.view == View::Logs => {
                self.logs.filters.show_requests = !self.logs.filters.show_requests;
            }
            (KeyCode::Char('s'), _) if self.view == View::Logs => {
                self.logs.filters.show_responses = !self.logs.filters.show_responses;
            }
            (KeyCode::Char('x'), _) if self.view == View::Logs => {
                self.logs.filters.show_errors = !self.logs.filters.show_errors;
            }
            // Log list scrolling
            (KeyCode::Up | KeyCode::Char('k'), _) if self.view == View::Logs => {
                self.log_scroll = self.log_scroll.saturating_sub(1);
            }
            (KeyCode::Down | KeyCode::Char('j'), _) if self.view == View::Logs => {
                self.log_scroll += 1;
            }
            (KeyCode::PageUp, _) if self.view == View::Logs => {
                self.log_scroll = self.log_scroll.saturating_sub(10);
            }
            (KeyCode::PageDown, _) if self.view == View::Logs => {
                self.log_scroll += 10;
            }
            (KeyCode::Home, _) if self.view == View::Logs => {
                self.log_scroll = 0;
            }
            _ => {}
        }
    }

    fn set_filter(&mut self, filter: DirectionFilter) {
        self.events.set_filter(filter);
        self.selected = 0;
    }

    fn clamp_selection(&mut self) {
        self.selected = self
            .selected
            .min(self.events.visible_len().saturating_sub(1));
    }
}

impl Default for DashboardApp {
    fn default() -> Self {
        Self::new()
    }
}
