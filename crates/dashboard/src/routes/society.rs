//! Society dashboard route handler.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use pulseboard_core::{
    DEFAULT_TREND_BASE, DEFAULT_TREND_POINTS, SocietyFilter, SocietyMetric, SocietySection,
    SocietyTimeframe,
};
use serde::Deserialize;
use tracing::instrument;

use super::{ApiResponse, non_empty};
use crate::error::Result;
use crate::models::{OptionView, SocietyMetricView, SocietySectionView, SocietyView};
use crate::services::{MetricsError, MetricsService};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SocietyQuery {
    pub filter: Option<String>,
    pub timeframe: Option<String>,
}

fn with_trends(
    metrics: &MetricsService,
    catalog: &[SocietyMetric],
) -> std::result::Result<Vec<SocietyMetricView>, MetricsError> {
    catalog
        .iter()
        .map(|&metric| {
            Ok(SocietyMetricView {
                metric,
                trend_series: metrics.trend(metric.trend, DEFAULT_TREND_POINTS, DEFAULT_TREND_BASE)?,
            })
        })
        .collect()
}

/// KPI catalog for the selected category, each metric with a fresh sparkline.
///
/// Key metrics are always included; `filter` narrows the detail sections.
/// Sparklines are regenerated on every request.
#[instrument(skip_all)]
pub async fn show(State(state): State<AppState>, Query(query): Query<SocietyQuery>) -> Result<Response> {
    let filter: SocietyFilter = non_empty(query.filter.as_deref())
        .map(str::parse)
        .transpose()?
        .unwrap_or_default();
    let timeframe: SocietyTimeframe = non_empty(query.timeframe.as_deref())
        .map(str::parse)
        .transpose()?
        .unwrap_or_default();

    let metrics = state.metrics();
    let key_metrics = with_trends(metrics, SocietySection::KeyMetrics.metrics())?;
    let sections = filter
        .sections()
        .into_iter()
        .map(|section| {
            Ok(SocietySectionView {
                id: section,
                title: section.title(),
                icon: section.icon(),
                metrics: with_trends(metrics, section.metrics())?,
            })
        })
        .collect::<std::result::Result<Vec<_>, MetricsError>>()?;

    let view = SocietyView {
        key_metrics,
        sections,
        timeframes: SocietyTimeframe::ALL
            .iter()
            .map(|t| OptionView {
                id: t.id(),
                label: t.label(),
            })
            .collect(),
        filters: SocietyFilter::ALL
            .iter()
            .map(|f| OptionView {
                id: f.id(),
                label: f.label(),
            })
            .collect(),
        timeframe,
        filter,
    };

    Ok(ApiResponse::ok(view).into_response())
}
