//! Query builders for the metrics store.
//!
//! SQL statements target `page_views`, `orders`, `offer_acceptances` and
//! `subscriptions`; aggregation pipelines target the `pageViews` and `orders`
//! collections. Each per-day query returns at most [`HISTORY_LENGTH`] rows,
//! newest first.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use pulseboard_core::{Funnel, HISTORY_LENGTH, Timeframe};
use serde_json::{Value, json};

/// Start of the reporting window for `timeframe`, relative to `now`.
#[must_use]
pub fn window_start(timeframe: Timeframe, now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(i64::from(timeframe.multiplier()))
}

/// `created_at >= '<window start>'`.
#[must_use]
pub fn time_filter(timeframe: Timeframe, now: DateTime<Utc>) -> String {
    let start = window_start(timeframe, now).to_rfc3339_opts(SecondsFormat::Millis, true);
    format!("created_at >= '{start}'")
}

/// SQL predicate restricting rows to `funnel`.
#[must_use]
pub fn funnel_filter(funnel: &Funnel) -> String {
    match funnel {
        Funnel::AllFunnels | Funnel::IndividualFunnels => "1=1".to_owned(),
        Funnel::SubscriptionFunnel => "funnel_type = 'subscription'".to_owned(),
        Funnel::OneTimeFunnel => "funnel_type = 'one-time'".to_owned(),
        Funnel::Individual(_) | Funnel::Other(_) => {
            format!("funnel_name = '{}'", quote_literal(funnel.as_str()))
        }
    }
}

/// Escape a value for use inside a single-quoted SQL literal.
fn quote_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// The four statements behind one dashboard snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardQueries {
    pub visitors: String,
    pub purchases: String,
    pub offers: String,
    pub subscriptions: String,
}

impl DashboardQueries {
    #[must_use]
    pub fn build(timeframe: Timeframe, funnel: &Funnel, now: DateTime<Utc>) -> Self {
        let time = time_filter(timeframe, now);
        let funnel = funnel_filter(funnel);

        let visitors = format!(
            "SELECT DATE(created_at) AS date, COUNT(DISTINCT user_id) AS visitors \
             FROM page_views \
             WHERE {time} AND {funnel} \
             GROUP BY DATE(created_at) \
             ORDER BY date DESC \
             LIMIT {HISTORY_LENGTH}"
        );

        let purchases = format!(
            "SELECT DATE(created_at) AS date, COUNT(*) AS purchases, \
             SUM(CASE WHEN subscription_type IS NOT NULL THEN 1 ELSE 0 END) AS subscriptions, \
             SUM(CASE WHEN subscription_type IS NULL THEN 1 ELSE 0 END) AS one_time_purchases \
             FROM orders \
             WHERE {time} AND {funnel} AND status = 'completed' \
             GROUP BY DATE(created_at) \
             ORDER BY date DESC \
             LIMIT {HISTORY_LENGTH}"
        );

        let offers = format!(
            "SELECT DATE(created_at) AS date, \
             SUM(CASE WHEN offer_type = 'order_bump' THEN 1 ELSE 0 END) AS order_bumps, \
             SUM(CASE WHEN offer_type = 'upsell_1' THEN 1 ELSE 0 END) AS upsell_1s, \
             SUM(CASE WHEN offer_type = 'upsell_2' THEN 1 ELSE 0 END) AS upsell_2s \
             FROM offer_acceptances \
             WHERE {time} AND {funnel} \
             GROUP BY DATE(created_at) \
             ORDER BY date DESC \
             LIMIT {HISTORY_LENGTH}"
        );

        let subscriptions = format!(
            "SELECT plan_name, COUNT(*) AS count \
             FROM subscriptions \
             WHERE status = 'active' AND {funnel} \
             GROUP BY plan_name \
             ORDER BY count DESC"
        );

        Self {
            visitors,
            purchases,
            offers,
            subscriptions,
        }
    }
}

/// `$match` document restricting documents to the reporting window.
#[must_use]
pub fn mongo_time_filter(timeframe: Timeframe, now: DateTime<Utc>) -> Value {
    let start = window_start(timeframe, now).to_rfc3339_opts(SecondsFormat::Millis, true);
    json!({ "createdAt": { "$gte": { "$date": start } } })
}

/// `$match` document restricting documents to `funnel`.
#[must_use]
pub fn mongo_funnel_filter(funnel: &Funnel) -> Value {
    match funnel {
        Funnel::AllFunnels | Funnel::IndividualFunnels => json!({}),
        Funnel::SubscriptionFunnel => json!({ "funnelType": "subscription" }),
        Funnel::OneTimeFunnel => json!({ "funnelType": "one-time" }),
        Funnel::Individual(_) | Funnel::Other(_) => json!({ "funnelName": funnel.as_str() }),
    }
}

/// Merge `$match` documents into one.
fn merge_match(parts: &[Value]) -> Value {
    let mut merged = serde_json::Map::new();
    for part in parts {
        if let Value::Object(fields) = part {
            merged.extend(fields.clone());
        }
    }
    Value::Object(merged)
}

/// Distinct visitors per day from `pageViews`.
#[must_use]
pub fn mongo_visitors_pipeline(timeframe: Timeframe, funnel: &Funnel, now: DateTime<Utc>) -> Vec<Value> {
    let filter = merge_match(&[mongo_time_filter(timeframe, now), mongo_funnel_filter(funnel)]);
    vec![
        json!({ "$match": filter }),
        json!({
            "$group": {
                "_id": { "$dateToString": { "format": "%Y-%m-%d", "date": "$createdAt" } },
                "visitors": { "$addToSet": "$userId" }
            }
        }),
        json!({ "$project": { "date": "$_id", "visitors": { "$size": "$visitors" } } }),
        json!({ "$sort": { "date": -1 } }),
        json!({ "$limit": HISTORY_LENGTH }),
    ]
}

/// Completed purchases per day from `orders`, split by subscription.
#[must_use]
pub fn mongo_purchases_pipeline(timeframe: Timeframe, funnel: &Funnel, now: DateTime<Utc>) -> Vec<Value> {
    let filter = merge_match(&[
        mongo_time_filter(timeframe, now),
        mongo_funnel_filter(funnel),
        json!({ "status": "completed" }),
    ]);
    vec![
        json!({ "$match": filter }),
        json!({
            "$group": {
                "_id": { "$dateToString": { "format": "%Y-%m-%d", "date": "$createdAt" } },
                "purchases": { "$sum": 1 },
                "subscriptions": {
                    "$sum": { "$cond": [{ "$ne": ["$subscriptionType", null] }, 1, 0] }
                },
                "oneTimePurchases": {
                    "$sum": { "$cond": [{ "$eq": ["$subscriptionType", null] }, 1, 0] }
                }
            }
        }),
        json!({ "$sort": { "_id": -1 } }),
        json!({ "$limit": HISTORY_LENGTH }),
    ]
}
