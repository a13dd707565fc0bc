//! HTTP client for the backend feed endpoints
//!
//! Thin reqwest wrapper that maps the three failure classes (transport,
//! non-2xx status, undecodable body) into the core error taxonomy.

use crate::config::Config;
use feedwatch_core::{Event, FetchError, LogRecord};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the events and logs endpoints
#[derive(Clone)]
pub struct FeedClient {
    events_url: String,
    logs_url: String,
    client: Client,
}

impl FeedClient {
    /// Create a new feed client
    pub fn new(config: &Config) -> Self {
        Self {
            events_url: config.events_url(),
            logs_url: config.logs_url(),
            client: Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Fetch the current event collection
    pub async fn fetch_events(&self) -> Result<Vec<Event>, FetchError> {
        self.fetch_list(&self.events_url).await
    }

    /// Fetch the current log collection
    pub async fn fetch_logs(&self) -> Result<Vec<LogRecord>, FetchError> {
        self.fetch_list(&self.logs_url).await
    }

    async fn fetch_list<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    /// Spin up an in-process backend and return a config pointing at it.
    async fn test_backend() -> Config {
        let app = Router::new()
            .route(
                "/api/events",
                get(|| async {
                    Json(json!([
                        {"direction": "incoming", "type": "webhook",
                         "timestamp": "2024-01-01 09:30:00", "data": {"signal": "buy"}},
                        {"direction": "sideways", "type": "mystery"}
                    ]))
                }),
            )
            .route(
                "/api/logs",
                get(|| async {
                    Json(json!([
                        {"id": 2, "type": "response", "status": "success",
                         "response": {"ok": true}},
                        {"id": 5, "type": "request", "method": "GET",
                         "endpoint": "/webhook", "data": {"signal": "buy"}}
                    ]))
                }),
            )
            .route(
                "/broken/events",
                get(|| async { "this is not json" }),
            )
            .route(
                "/failing/events",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Config {
            server_url: format!("http://{}", addr),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_events_decodes_records() {
        let config = test_backend().await;
        let client = FeedClient::new(&config);

        let events = client.fetch_events().await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, "webhook");
        // Unrecognized directions decode instead of failing the fetch.
        assert_eq!(events[1].direction, feedwatch_core::Direction::Unknown);
    }

    #[tokio::test]
    async fn test_fetch_logs_decodes_records() {
        let config = test_backend().await;
        let client = FeedClient::new(&config);

        let logs = client.fetch_logs().await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[1].endpoint.as_deref(), Some("/webhook"));
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_http_error() {
        let mut config = test_backend().await;
        config.events_path = "/failing/events".to_string();
        let client = FeedClient::new(&config);

        match client.fetch_events().await {
            Err(FetchError::Http { status: 500 }) => {}
            other => panic!("expected HTTP 500 error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_maps_to_parse_error() {
        let mut config = test_backend().await;
        config.events_path = "/broken/events".to_string();
        let client = FeedClient::new(&config);

        match client.fetch_events().await {
            Err(FetchError::Parse(_)) => {}
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server_maps_to_network_error() {
        let config = Config {
            // Reserved TEST-NET address, nothing listens there.
            server_url: "http://192.0.2.1:1".to_string(),
            ..Config::default()
        };
        let client = FeedClient::new(&config);

        match client.fetch_events().await {
            Err(FetchError::Network(_)) => {}
            other => panic!("expected network error, got {other:?}"),
        }
    }
}
