//! CLI command handlers

pub mod events;
pub mod logs;
pub mod watch;
