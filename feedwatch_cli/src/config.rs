//! CLI configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Get the configuration directory path
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("feedwatch")
    }

    #[cfg(not(target_os = "windows"))]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".feedwatch")
    }
}

/// Get the config file path
pub fn config_file() -> PathBuf {
    config_dir().join("config.yml")
}

/// Ensure the config directory exists
pub fn ensure_dirs() -> Result<()> {
    fs::create_dir_all(config_dir()).context("Failed to create config directory")?;
    Ok(())
}

/// Main configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL (default: http://127.0.0.1:5000)
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Poll interval in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Path of the events endpoint
    #[serde(default = "default_events_path")]
    pub events_path: String,

    /// Path of the logs endpoint
    #[serde(default = "default_logs_path")]
    pub logs_path: String,
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_poll_interval_ms() -> u64 {
    5000
}

fn default_events_path() -> String {
    "/api/events".to_string()
}

fn default_logs_path() -> String {
    "/api/logs".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            poll_interval_ms: default_poll_interval_ms(),
            events_path: default_events_path(),
            logs_path: default_logs_path(),
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        let path = config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Config =
            serde_yaml::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        ensure_dirs()?;
        let path = config_file();
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        fs::write(&path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Apply command-line overrides on top of the loaded file
    pub fn with_overrides(mut self, server: Option<String>, interval_ms: Option<u64>) -> Self {
        if let Some(server) = server {
            self.server_url = server;
        }
        if let Some(interval_ms) = interval_ms {
            self.poll_interval_ms = interval_ms;
        }
        self
    }

    /// Full URL of the events endpoint
    pub fn events_url(&self) -> String {
        join_url(&self.server_url, &self.events_path)
    }

    /// Full URL of the logs endpoint
    pub fn logs_url(&self) -> String {
        join_url(&self.server_url, &self.logs_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.poll_interval_ms, 5000);
        assert_eq!(config.events_url(), "http://127.0.0.1:5000/api/events");
        assert_eq!(config.logs_url(), "http://127.0.0.1:5000/api/logs");
    }

    #[test]
    fn test_join_url_handles_slashes() {
        assert_eq!(
            join_url("http://localhost:5000/", "/api/logs"),
            "http://localhost:5000/api/logs"
        );
        assert_eq!(
            join_url("http://localhost:5000", "api/logs"),
            "http://localhost:5000/api/logs"
        );
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let config = Config::default().with_overrides(
            Some("http://example.com".to_string()),
            Some(1000),
        );
        assert_eq!(config.server_url, "http://example.com");
        assert_eq!(config.poll_interval_ms, 1000);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_yaml::from_str("server_url: http://trader:8080\n").unwrap();
        assert_eq!(config.server_url, "http://trader:8080");
        assert_eq!(config.poll_interval_ms, 5000);
        assert_eq!(config.events_path, "/api/events");
    }
}
