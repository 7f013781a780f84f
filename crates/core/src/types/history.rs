//! Selectable history series for the per-metric history view.
//!
//! Five series are raw funnel history arrays. The four rate series are
//! computed pointwise from two raw arrays, yielding 0 wherever the
//! denominator sample is 0.

use serde::{Deserialize, Serialize};

use super::ParseError;
use super::snapshot::FunnelHistory;

/// A metric whose history can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HistoryMetric {
    Visitors,
    Purchases,
    ConversionRate,
    NewSubscribers,
    ActiveSubscriptions,
    OneTimePurchases,
    OrderBumpRate,
    #[serde(rename = "upsell1Rate")]
    Upsell1Rate,
    #[serde(rename = "upsell2Rate")]
    Upsell2Rate,
}

/// Unit reported alongside a history series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricUnit {
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "count")]
    Count,
}

impl HistoryMetric {
    pub const ALL: [Self; 9] = [
        Self::Visitors,
        Self::Purchases,
        Self::ConversionRate,
        Self::NewSubscribers,
        Self::ActiveSubscriptions,
        Self::OneTimePurchases,
        Self::OrderBumpRate,
        Self::Upsell1Rate,
        Self::Upsell2Rate,
    ];

    /// Path identifier (`conversionRate`, `upsell1Rate`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visitors => "visitors",
            Self::Purchases => "purchases",
            Self::ConversionRate => "conversionRate",
            Self::NewSubscribers => "newSubscribers",
            Self::ActiveSubscriptions => "activeSubscriptions",
            Self::OneTimePurchases => "oneTimePurchases",
            Self::OrderBumpRate => "orderBumpRate",
            Self::Upsell1Rate => "upsell1Rate",
            Self::Upsell2Rate => "upsell2Rate",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Visitors => "Visitors",
            Self::Purchases => "Purchases",
            Self::ConversionRate => "Conversion Rate",
            Self::NewSubscribers => "New Subscribers",
            Self::ActiveSubscriptions => "Active Subscriptions",
            Self::OneTimePurchases => "One-Time Purchases",
            Self::OrderBumpRate => "Order Bump Rate",
            Self::Upsell1Rate => "Upsell 1 Rate",
            Self::Upsell2Rate => "Upsell 2 Rate",
        }
    }

    #[must_use]
    pub const fn unit(self) -> MetricUnit {
        match self {
            Self::ConversionRate | Self::OrderBumpRate | Self::Upsell1Rate | Self::Upsell2Rate => {
                MetricUnit::Percent
            }
            _ => MetricUnit::Count,
        }
    }

    /// Extract this metric's series from a funnel history.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Synthetic counts stay far below 2^52
    pub fn series(self, history: &FunnelHistory) -> Vec<f64> {
        let raw = |values: &[u64]| values.iter().map(|&v| v as f64).collect();
        match self {
            Self::Visitors => raw(&history.visitors),
            Self::Purchases => raw(&history.purchases),
            Self::NewSubscribers => raw(&history.new_subscribers),
            Self::ActiveSubscriptions => raw(&history.active_subscriptions),
            Self::OneTimePurchases => raw(&history.one_time_purchases),
            Self::ConversionRate => pointwise_rate(&history.purchases, &history.visitors),
            Self::OrderBumpRate => {
                pointwise_rate(&history.order_bumps_accepted, &history.purchases)
            }
            Self::Upsell1Rate => pointwise_rate(&history.upsell1_accepted, &history.purchases),
            Self::Upsell2Rate => {
                pointwise_rate(&history.upsell2_accepted, &history.upsell1_accepted)
            }
        }
    }
}

/// `numerator[i] / denominator[i] * 100`, truncated to the shorter series.
#[allow(clippy::cast_precision_loss)]
fn pointwise_rate(numerator: &[u64], denominator: &[u64]) -> Vec<f64> {
    numerator
        .iter()
        .zip(denominator)
        .map(|(&n, &d)| if d > 0 { n as f64 / d as f64 * 100.0 } else { 0.0 })
        .collect()
}

impl std::fmt::Display for HistoryMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HistoryMetric {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str() == s)
            .ok_or_else(|| ParseError::HistoryMetric(s.to_owned()))
    }
}
