//! Trend series route handler.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use pulseboard_core::{DEFAULT_TREND_BASE, DEFAULT_TREND_POINTS, TrendError};
use serde::Deserialize;
use tracing::instrument;

use super::{ApiResponse, non_empty};
use crate::error::{AppError, Result};
use crate::models::TrendView;
use crate::services::MetricsError;
use crate::state::AppState;

/// Upper bound on generated points per request.
const MAX_TREND_POINTS: usize = 1000;

#[derive(Debug, Default, Deserialize)]
pub struct TrendQuery {
    pub trend: Option<String>,
    pub points: Option<String>,
    pub base: Option<String>,
}

/// Parse an optional numeric parameter, mapping failures to `err`.
fn parse_param<T: std::str::FromStr>(raw: Option<&str>, default: Option<T>, err: TrendError) -> Result<T> {
    match non_empty(raw) {
        Some(raw) => raw.trim().parse().map_err(|_| MetricsError::Trend(err).into()),
        None => default.ok_or_else(|| MetricsError::Trend(err).into()),
    }
}

/// One trend series. `trend` is required; `points` and `base` default to 30
/// and 50.
#[instrument(skip_all)]
pub async fn show(State(state): State<AppState>, Query(query): Query<TrendQuery>) -> Result<Response> {
    let trend: f64 = parse_param(query.trend.as_deref(), None, TrendError::InvalidTrend)?;
    let points: usize = parse_param(
        query.points.as_deref(),
        Some(DEFAULT_TREND_POINTS),
        TrendError::NoPoints,
    )?;
    let base_value: f64 = parse_param(
        query.base.as_deref(),
        Some(DEFAULT_TREND_BASE),
        TrendError::InvalidBase,
    )?;

    if points > MAX_TREND_POINTS {
        return Err(AppError::BadRequest(format!(
            "Points must be at most {MAX_TREND_POINTS}"
        )));
    }

    let values = state.metrics().trend(trend, points, base_value)?;
    Ok(ApiResponse::ok(TrendView {
        trend,
        points,
        base_value,
        values,
    })
    .into_response())
}
