//! End-to-end tests for the funnel analytics endpoints.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::{Duration, Instant};

use pulseboard_dashboard::config::{CacheConfig, DashboardConfig};
use pulseboard_integration_tests::TestServer;
use reqwest::StatusCode;

#[tokio::test]
async fn health_check_responds() {
    let server = TestServer::start().await;
    let response = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn dashboard_keeps_funnel_invariants() {
    let server = TestServer::start().await;
    for timeframe in ["daily", "weekly", "monthly"] {
        let (status, body) = server
            .get_json(&format!("/api/dashboard?timeframe={timeframe}&funnel=subscription-funnel"))
            .await;
        assert_eq!(status, StatusCode::OK, "{timeframe}");

        let metrics = &body["data"]["metrics"];
        let purchases = metrics["purchases"].as_u64().unwrap();
        assert!(purchases <= metrics["visitors"].as_u64().unwrap());
        assert_eq!(
            purchases,
            metrics["newSubscribers"].as_u64().unwrap()
                + metrics["oneTimePurchases"].as_u64().unwrap()
        );

        let plans = body["data"]["subscriptionPlans"].as_array().unwrap();
        let counts: Vec<u64> = plans.iter().map(|p| p["count"].as_u64().unwrap()).collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]), "{counts:?}");
    }
}

#[tokio::test]
async fn repeated_polls_are_served_from_cache() {
    let server = TestServer::start().await;
    let (_, first) = server.get_json("/api/dashboard?funnel=Tripwire%20Funnel").await;
    let (_, second) = server.get_json("/api/dashboard?funnel=Tripwire%20Funnel").await;
    assert_eq!(first, second);
    assert_eq!(first["data"]["funnel"], "Tripwire Funnel");
}

#[tokio::test]
async fn disabled_cache_regenerates_each_poll() {
    let server = TestServer::with_config(DashboardConfig {
        simulated_latency: Duration::ZERO,
        rng_seed: Some(42),
        cache: CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        },
        ..DashboardConfig::default()
    })
    .await;
    let (_, first) = server.get_json("/api/dashboard").await;
    let (_, second) = server.get_json("/api/dashboard").await;
    assert_ne!(first["data"]["history"], second["data"]["history"]);
}

#[tokio::test]
async fn uncached_dashboard_waits_out_simulated_latency() {
    let server = TestServer::with_config(DashboardConfig {
        simulated_latency: Duration::from_millis(80),
        rng_seed: Some(42),
        ..DashboardConfig::default()
    })
    .await;

    let started = Instant::now();
    let (status, _) = server.get_json("/api/dashboard?timeframe=weekly").await;
    assert_eq!(status, StatusCode::OK);
    assert!(started.elapsed() >= Duration::from_millis(80));
}

#[tokio::test]
async fn history_labels_match_values() {
    let server = TestServer::start().await;
    let (status, body) = server
        .get_json("/api/history/orderBumpRate?timeframe=monthly&days=10")
        .await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["metric"], "Order Bump Rate");
    assert_eq!(data["unit"], "%");
    assert_eq!(data["values"].as_array().unwrap().len(), 10);
    assert_eq!(data["labels"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn errors_use_the_error_envelope() {
    let server = TestServer::start().await;
    let cases = [
        ("/api/dashboard?timeframe=quarterly", "Invalid timeframe"),
        ("/api/engagement?funnel=unknown", "Invalid funnel type"),
        ("/api/history/visitors?days=400", "Days must be between 1 and 365"),
        ("/api/history/revenue", "Invalid metric"),
    ];
    for (path, message) in cases {
        let (status, body) = server.get_json(path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(body, serde_json::json!({ "error": message }), "{path}");
    }
}

#[tokio::test]
async fn funnel_catalog_reports_total() {
    let server = TestServer::start().await;
    let (status, body) = server.get_json("/api/funnels").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total"], body["data"].as_array().unwrap().len());
}
