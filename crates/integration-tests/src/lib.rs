//! Integration tests for Pulseboard.
//!
//! Each test spawns the full dashboard router on an ephemeral port and talks
//! to it over HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pulseboard-integration-tests
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use pulseboard_dashboard::cache::ApiCache;
use pulseboard_dashboard::config::DashboardConfig;
use pulseboard_dashboard::routes::build_router;
use pulseboard_dashboard::services::MetricsService;
use pulseboard_dashboard::state::AppState;
use reqwest::Client;
use serde_json::Value;

/// A dashboard server bound to `127.0.0.1` on a random port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestServer {
    /// Start a seeded server with no artificial latency.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        Self::with_config(DashboardConfig {
            simulated_latency: Duration::ZERO,
            rng_seed: Some(42),
            ..DashboardConfig::default()
        })
        .await
    }

    /// Start a server from an explicit configuration.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    #[allow(clippy::expect_used)]
    pub async fn with_config(config: DashboardConfig) -> Self {
        let cache = ApiCache::new(&config.cache);
        let metrics = MetricsService::new(config.rng_seed, None);
        let app = build_router(AppState::from_parts(config, cache, metrics));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            client: Client::new(),
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// GET `path` and decode the JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    #[allow(clippy::expect_used)]
    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed");
        let status = response.status();
        let body = response.json().await.expect("Body is not JSON");
        (status, body)
    }
}
