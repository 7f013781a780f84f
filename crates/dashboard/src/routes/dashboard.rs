//! Funnel dashboard route handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use pulseboard_core::derive_metrics;
use tracing::instrument;

use super::{ApiResponse, FilterQuery, simulate_latency};
use crate::cache::{CacheKey, CacheValue};
use crate::error::Result;
use crate::models::DashboardView;
use crate::state::AppState;

/// Funnel metrics, subscription plans and history for one view.
///
/// Cached per `(timeframe, funnel)`; misses wait out the configured latency
/// before generating.
#[instrument(skip_all)]
pub async fn show(State(state): State<AppState>, Query(query): Query<FilterQuery>) -> Result<Response> {
    let timeframe = query.timeframe()?;
    let funnel = query.funnel()?;
    let key = CacheKey::Dashboard {
        timeframe,
        funnel: funnel.clone(),
    };

    if let Some(CacheValue::Dashboard(view)) = state.cache().get(&key).await {
        return Ok(ApiResponse::ok(view.as_ref()).into_response());
    }

    simulate_latency(state.config().simulated_latency).await;

    let snapshot = state.metrics().funnel_snapshot(timeframe, &funnel).await?;
    let view = Arc::new(DashboardView {
        metrics: derive_metrics(&snapshot),
        subscription_plans: snapshot.subscription_plans,
        history: snapshot.history,
        timeframe,
        funnel,
        last_updated: Utc::now(),
    });

    state
        .cache()
        .insert(key, CacheValue::Dashboard(Arc::clone(&view)))
        .await;

    Ok(ApiResponse::ok(view.as_ref()).into_response())
}
