//! Per-metric history route handler.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use chrono::{Days, NaiveDate, Utc};
use pulseboard_core::HistoryMetric;
use serde::Deserialize;
use tracing::instrument;

use super::{ApiResponse, FilterQuery, non_empty};
use crate::cache::{CacheKey, CacheValue};
use crate::error::{AppError, Result};
use crate::models::HistoryView;
use crate::state::AppState;

const DEFAULT_DAYS: u16 = 30;
const MAX_DAYS: u16 = 365;

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(flatten)]
    pub filter: FilterQuery,
    pub days: Option<String>,
}

/// Parse `days`, which must be an integer in `1..=365`.
fn parse_days(raw: Option<&str>) -> Result<u16> {
    let Some(raw) = non_empty(raw) else {
        return Ok(DEFAULT_DAYS);
    };
    raw.parse::<u16>()
        .ok()
        .filter(|days| (1..=MAX_DAYS).contains(days))
        .ok_or_else(|| AppError::BadRequest("Days must be between 1 and 365".to_string()))
}

/// `"Mon D"` labels for `count` consecutive days ending on `today`.
fn date_labels(count: usize, today: NaiveDate) -> Vec<String> {
    (0..count)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::try_from(offset).ok()?)))
        .map(|date| date.format("%b %-d").to_string())
        .collect()
}

/// One metric's history, trimmed to the last `days` samples.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    Path(metric): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Response> {
    let timeframe = query.filter.timeframe()?;
    let funnel = query.filter.funnel()?;
    let days = parse_days(query.days.as_deref())?;
    let metric: HistoryMetric = metric.parse()?;

    let key = CacheKey::History {
        metric,
        timeframe,
        funnel: funnel.clone(),
        days,
    };
    if let Some(CacheValue::History(view)) = state.cache().get(&key).await {
        return Ok(ApiResponse::ok(view.as_ref()).into_response());
    }

    let snapshot = state.metrics().funnel_snapshot(timeframe, &funnel).await?;
    let series = metric.series(&snapshot.history);
    let skip = series.len().saturating_sub(usize::from(days));
    let values: Vec<f64> = series.into_iter().skip(skip).collect();
    let labels = date_labels(values.len(), Utc::now().date_naive());

    let view = Arc::new(HistoryView {
        metric: metric.display_name().to_string(),
        values,
        labels,
        timeframe,
        funnel,
        unit: metric.unit(),
        last_updated: Utc::now(),
    });

    state
        .cache()
        .insert(key, CacheValue::History(Arc::clone(&view)))
        .await;

    Ok(ApiResponse::ok(view.as_ref()).into_response())
}
