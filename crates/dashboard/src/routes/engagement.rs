//! Post engagement route handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use pulseboard_core::engagement_metrics;
use tracing::instrument;

use super::{ApiResponse, FilterQuery};
use crate::cache::{CacheKey, CacheValue};
use crate::error::Result;
use crate::models::EngagementView;
use crate::state::AppState;

/// Engagement metrics and history, cached per `(timeframe, funnel)`.
#[instrument(skip_all)]
pub async fn show(State(state): State<AppState>, Query(query): Query<FilterQuery>) -> Result<Response> {
    let timeframe = query.timeframe()?;
    let funnel = query.funnel()?;
    let key = CacheKey::Engagement {
        timeframe,
        funnel: funnel.clone(),
    };

    if let Some(CacheValue::Engagement(view)) = state.cache().get(&key).await {
        return Ok(ApiResponse::ok(view.as_ref()).into_response());
    }

    let snapshot = state.metrics().engagement(timeframe, &funnel)?;
    let view = Arc::new(EngagementView {
        metrics: engagement_metrics(&snapshot),
        history: snapshot.history,
        timeframe,
        funnel,
        last_updated: Utc::now(),
    });

    state
        .cache()
        .insert(key, CacheValue::Engagement(Arc::clone(&view)))
        .await;

    Ok(ApiResponse::ok(view.as_ref()).into_response())
}
