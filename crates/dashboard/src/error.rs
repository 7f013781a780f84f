//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client with a JSON `{ "error": "..." }` body. All
//! route handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pulseboard_core::ParseError;
use serde::Serialize;
use thiserror::Error;

use crate::services::MetricsError;

/// Application-level error type for the dashboard.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request from client. The message is returned verbatim.
    #[error("{0}")]
    BadRequest(String),

    /// Metrics generation failed.
    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),
}

/// JSON body returned for every error.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        let message = match err {
            ParseError::Timeframe(_) | ParseError::SocietyTimeframe(_) => "Invalid timeframe",
            ParseError::Funnel(_) => "Invalid funnel type",
            ParseError::HistoryMetric(_) => "Invalid metric",
            ParseError::SocietyFilter(_) => "Invalid filter",
        };
        Self::BadRequest(message.to_string())
    }
}

impl AppError {
    const fn is_server_error(&self) -> bool {
        match self {
            Self::BadRequest(_) => false,
            Self::Metrics(err) => !err.is_client_error(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = if self.is_server_error() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::BAD_REQUEST
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::BadRequest(message) => message.clone(),
            Self::Metrics(MetricsError::Trend(err)) => err.to_string(),
            Self::Metrics(_) => "Internal server error".to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
