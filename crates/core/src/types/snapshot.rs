//! Checkout-funnel snapshot and the ratios derived from it.

use serde::{Deserialize, Serialize};

/// One generated sample of funnel volumes for a (timeframe, funnel) pair.
///
/// `purchases == new_subscribers + one_time_purchases` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelSnapshot {
    pub visitors: u64,
    pub purchases: u64,
    pub one_time_purchases: u64,
    pub new_subscribers: u64,
    /// Percentage in `[1, 6)`.
    pub churn_rate: f64,
    pub order_bumps_accepted: u64,
    pub upsell1_accepted: u64,
    pub upsell2_accepted: u64,
    pub active_subscriptions: u64,
    /// Sorted descending by count.
    pub subscription_plans: Vec<SubscriptionPlan>,
    pub history: FunnelHistory,
}

/// Subscriber count for one subscription plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub name: String,
    pub count: u64,
}

/// Per-period samples for each scalar funnel metric.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelHistory {
    pub visitors: Vec<u64>,
    pub purchases: Vec<u64>,
    pub new_subscribers: Vec<u64>,
    pub one_time_purchases: Vec<u64>,
    pub active_subscriptions: Vec<u64>,
    pub order_bumps_accepted: Vec<u64>,
    pub upsell1_accepted: Vec<u64>,
    pub upsell2_accepted: Vec<u64>,
}

impl FunnelHistory {
    /// Every series paired with its wire name.
    #[must_use]
    pub fn series(&self) -> [(&'static str, &[u64]); 8] {
        [
            ("visitors", &self.visitors),
            ("purchases", &self.purchases),
            ("newSubscribers", &self.new_subscribers),
            ("oneTimePurchases", &self.one_time_purchases),
            ("activeSubscriptions", &self.active_subscriptions),
            ("orderBumpsAccepted", &self.order_bumps_accepted),
            ("upsell1Accepted", &self.upsell1_accepted),
            ("upsell2Accepted", &self.upsell2_accepted),
        ]
    }
}

/// Ratios projected from a [`FunnelSnapshot`].
///
/// Every rate is a percentage and is 0 when its denominator is 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub visitors: u64,
    pub purchases: u64,
    pub conversion_rate: f64,
    pub new_subscribers: u64,
    pub active_subscriptions: u64,
    pub one_time_purchases: u64,
    pub churn_rate: f64,
    pub order_bump_rate: f64,
    pub upsell1_rate: f64,
    pub upsell2_rate: f64,
}

impl DerivedMetrics {
    /// Every metric as `(wire name, value)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Synthetic counts stay far below 2^52
    pub fn entries(&self) -> [(&'static str, f64); 10] {
        [
            ("visitors", self.visitors as f64),
            ("purchases", self.purchases as f64),
            ("conversionRate", self.conversion_rate),
            ("newSubscribers", self.new_subscribers as f64),
            ("activeSubscriptions", self.active_subscriptions as f64),
            ("oneTimePurchases", self.one_time_purchases as f64),
            ("churnRate", self.churn_rate),
            ("orderBumpRate", self.order_bump_rate),
            ("upsell1Rate", self.upsell1_rate),
            ("upsell2Rate", self.upsell2_rate),
        ]
    }
}
