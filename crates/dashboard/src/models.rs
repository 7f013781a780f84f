//! Response payloads carried in the `data` field of the API envelope.

use chrono::{DateTime, Utc};
use pulseboard_core::{
    DerivedMetrics, EngagementHistory, EngagementMetrics, Funnel, FunnelHistory, MetricUnit,
    SocietyFilter, SocietyMetric, SocietySection, SocietyTimeframe, SubscriptionPlan, Timeframe,
};
use serde::{Deserialize, Serialize};

/// `GET /api/dashboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub metrics: DerivedMetrics,
    pub subscription_plans: Vec<SubscriptionPlan>,
    pub history: FunnelHistory,
    pub timeframe: Timeframe,
    pub funnel: Funnel,
    pub last_updated: DateTime<Utc>,
}

/// `GET /api/engagement`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementView {
    pub metrics: EngagementMetrics,
    pub history: EngagementHistory,
    pub timeframe: Timeframe,
    pub funnel: Funnel,
    pub last_updated: DateTime<Utc>,
}

/// `GET /api/history/{metric}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    /// Display name, e.g. "Conversion Rate".
    pub metric: String,
    pub values: Vec<f64>,
    /// One `"Mon D"` label per value, ending today.
    pub labels: Vec<String>,
    pub timeframe: Timeframe,
    pub funnel: Funnel,
    pub unit: MetricUnit,
    pub last_updated: DateTime<Utc>,
}

/// `GET /api/trend`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendView {
    pub trend: f64,
    pub points: usize,
    pub base_value: f64,
    pub values: Vec<f64>,
}

/// A society KPI with its generated sparkline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocietyMetricView {
    #[serde(flatten)]
    pub metric: SocietyMetric,
    pub trend_series: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocietySectionView {
    pub id: SocietySection,
    pub title: &'static str,
    pub icon: &'static str,
    pub metrics: Vec<SocietyMetricView>,
}

/// Selectable option as `{ id, label }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub id: &'static str,
    pub label: &'static str,
}

/// `GET /api/society`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocietyView {
    pub key_metrics: Vec<SocietyMetricView>,
    pub sections: Vec<SocietySectionView>,
    pub timeframes: Vec<OptionView>,
    pub filters: Vec<OptionView>,
    pub timeframe: SocietyTimeframe,
    pub filter: SocietyFilter,
}
