//! Terminal User Interface for the feedwatch dashboard

mod app;
mod ui;

pub use app::{DashboardApp, View};
pub use ui::draw;
