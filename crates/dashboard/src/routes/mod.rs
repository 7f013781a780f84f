//! HTTP route handlers for the dashboard API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Liveness check
//!
//! # Funnel analytics
//! GET  /api/dashboard            - Funnel metrics, plans and history
//! GET  /api/engagement           - Post engagement metrics and history
//! GET  /api/funnels              - Selectable funnels
//! GET  /api/history/{metric}     - One metric's history with date labels
//!
//! # Society dashboard
//! GET  /api/society              - KPI catalog with trend sparklines
//! GET  /api/trend                - A single generated trend series
//! ```
//!
//! Successful responses are wrapped as `{ "success": true, "data": ... }`;
//! errors are `{ "error": "..." }` (see [`crate::error::AppError`]).

pub mod dashboard;
pub mod engagement;
pub mod funnels;
pub mod history;
pub mod society;
pub mod trend;

use std::time::Duration;

use axum::{
    Json, Router,
    http::{Method, header},
    middleware::from_fn,
    response::{IntoResponse, Response},
    routing::get,
};
use pulseboard_core::{Funnel, Timeframe};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::error::AppError;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            total: None,
        }
    }

    #[must_use]
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `timeframe` and `funnel` query parameters shared by the funnel views.
///
/// Missing or empty values default to `daily` and `all-funnels`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    pub timeframe: Option<String>,
    pub funnel: Option<String>,
}

impl FilterQuery {
    /// # Errors
    ///
    /// Returns `AppError::BadRequest("Invalid timeframe")` for unknown values.
    pub fn timeframe(&self) -> Result<Timeframe, AppError> {
        Ok(non_empty(self.timeframe.as_deref())
            .map(str::parse)
            .transpose()?
            .unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns `AppError::BadRequest("Invalid funnel type")` for unknown values.
    pub fn funnel(&self) -> Result<Funnel, AppError> {
        Ok(non_empty(self.funnel.as_deref())
            .map(str::parse)
            .transpose()?
            .unwrap_or_default())
    }
}

/// Treat empty query values as absent.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Wait out the configured artificial latency.
pub(crate) async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

/// API routes, mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::show))
        .route("/engagement", get(engagement::show))
        .route("/funnels", get(funnels::index))
        .route("/history/{metric}", get(history::show))
        .route("/society", get(society::show))
        .route("/trend", get(trend::show))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Build the complete application router with middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        .layer(cors)
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
