//! Dashboard snapshot assembled from the metrics store.

use chrono::Utc;
use pulseboard_core::{
    Funnel, FunnelHistory, FunnelSnapshot, HISTORY_LENGTH, SubscriptionPlan, Timeframe,
};
use serde_json::Value;
use tracing::instrument;

use super::queries::{DashboardQueries, mongo_purchases_pipeline, mongo_visitors_pipeline};
use super::{DatabaseConnection, DatabaseError, DatabaseKind, Row};

/// Churn reported until subscription history is tracked in the store.
const PLACEHOLDER_CHURN_RATE: f64 = 2.5;

/// Reads dashboard snapshots from the metrics store.
#[derive(Debug)]
pub struct DatabaseService {
    connection: DatabaseConnection,
}

impl DatabaseService {
    #[must_use]
    pub const fn new(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Load the snapshot for `timeframe` and `funnel`.
    ///
    /// Returns `Ok(None)` when the store has no rows for the selection.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any query fails.
    #[instrument(skip_all, fields(timeframe = %timeframe, funnel = %funnel))]
    pub async fn dashboard_data(
        &self,
        timeframe: Timeframe,
        funnel: &Funnel,
    ) -> Result<Option<FunnelSnapshot>, DatabaseError> {
        match self.connection.config().kind {
            DatabaseKind::Postgres => self.dashboard_data_sql(timeframe, funnel).await,
            DatabaseKind::Mongo => self.dashboard_data_mongo(timeframe, funnel).await,
        }
    }

    async fn dashboard_data_sql(
        &self,
        timeframe: Timeframe,
        funnel: &Funnel,
    ) -> Result<Option<FunnelSnapshot>, DatabaseError> {
        let queries = DashboardQueries::build(timeframe, funnel, Utc::now());
        let (visitors, purchases, offers, subscriptions) = tokio::try_join!(
            self.connection.query(&queries.visitors),
            self.connection.query(&queries.purchases),
            self.connection.query(&queries.offers),
            self.connection.query(&queries.subscriptions),
        )?;
        Ok(snapshot_from_rows(&visitors, &purchases, &offers, &subscriptions))
    }

    async fn dashboard_data_mongo(
        &self,
        timeframe: Timeframe,
        funnel: &Funnel,
    ) -> Result<Option<FunnelSnapshot>, DatabaseError> {
        let now = Utc::now();
        let visitors_pipeline = mongo_visitors_pipeline(timeframe, funnel, now);
        let purchases_pipeline = mongo_purchases_pipeline(timeframe, funnel, now);
        let (visitors, purchases) = tokio::try_join!(
            self.connection.aggregate("pageViews", &visitors_pipeline),
            self.connection.aggregate("orders", &purchases_pipeline),
        )?;
        let purchases: Vec<Row> = purchases.into_iter().map(mongo_purchase_columns).collect();
        Ok(snapshot_from_rows(&visitors, &purchases, &[], &[]))
    }
}

/// Rename camelCase aggregation fields to the SQL column names.
fn mongo_purchase_columns(mut row: Row) -> Row {
    if let Some(value) = row.remove("oneTimePurchases") {
        row.insert("one_time_purchases".to_owned(), value);
    }
    row
}

/// Read a count column, accepting numbers and numeric strings.
fn count(row: &Row, column: &str) -> u64 {
    match row.get(column) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        _ => 0,
    }
}

/// Per-day column values, oldest first.
///
/// Keeps the newest [`HISTORY_LENGTH`] rows and zero-fills the missing
/// older days, so the series is always exactly [`HISTORY_LENGTH`] long.
fn column_history(rows: &[Row], column: &str) -> Vec<u64> {
    let recent: Vec<u64> = rows
        .iter()
        .take(HISTORY_LENGTH)
        .rev()
        .map(|row| count(row, column))
        .collect();
    let mut series = vec![0; HISTORY_LENGTH.saturating_sub(recent.len())];
    series.extend(recent);
    series
}

fn column_total(rows: &[Row], column: &str) -> u64 {
    rows.iter().map(|row| count(row, column)).sum()
}

/// Fold query results into a snapshot.
///
/// Per-day rows arrive newest first; history series are returned oldest
/// first and padded to [`HISTORY_LENGTH`]. The store keeps no per-day
/// subscription counts, so the active-subscriptions series repeats the
/// current total. Returns `None` when every result set is empty.
#[must_use]
pub fn snapshot_from_rows(
    visitors: &[Row],
    purchases: &[Row],
    offers: &[Row],
    subscriptions: &[Row],
) -> Option<FunnelSnapshot> {
    if visitors.is_empty() && purchases.is_empty() && offers.is_empty() && subscriptions.is_empty() {
        return None;
    }

    let total_purchases = column_total(purchases, "purchases");
    let new_subscribers = column_total(purchases, "subscriptions").min(total_purchases);

    let mut subscription_plans: Vec<SubscriptionPlan> = subscriptions
        .iter()
        .map(|row| SubscriptionPlan {
            name: row
                .get("plan_name")
                .and_then(Value::as_str)
                .unwrap_or("Unknown")
                .to_owned(),
            count: count(row, "count"),
        })
        .collect();
    subscription_plans.sort_by(|a, b| b.count.cmp(&a.count));
    let active_subscriptions = column_total(subscriptions, "count");

    Some(FunnelSnapshot {
        visitors: column_total(visitors, "visitors"),
        purchases: total_purchases,
        one_time_purchases: total_purchases - new_subscribers,
        new_subscribers,
        churn_rate: PLACEHOLDER_CHURN_RATE,
        order_bumps_accepted: column_total(offers, "order_bumps"),
        upsell1_accepted: column_total(offers, "upsell_1s"),
        upsell2_accepted: column_total(offers, "upsell_2s"),
        active_subscriptions,
        subscription_plans,
        history: FunnelHistory {
            visitors: column_history(visitors, "visitors"),
            purchases: column_history(purchases, "purchases"),
            new_subscribers: column_history(purchases, "subscriptions"),
            one_time_purchases: column_history(purchases, "one_time_purchases"),
            active_subscriptions: vec![active_subscriptions; HISTORY_LENGTH],
            order_bumps_accepted: column_history(offers, "order_bumps"),
            upsell1_accepted: column_history(offers, "upsell_1s"),
            upsell2_accepted: column_history(offers, "upsell_2s"),
        },
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::db::DatabaseConfig;

    fn rows(values: Value) -> Vec<Row> {
        values
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    fn service(url: &str) -> DatabaseService {
        let config = DatabaseConfig::from_url(url).unwrap();
        DatabaseService::new(DatabaseConnection::open(config).unwrap())
    }

    #[test]
    fn test_empty_results_yield_none() {
        assert!(snapshot_from_rows(&[], &[], &[], &[]).is_none());
    }

    #[test]
    fn test_rows_fold_into_snapshot() {
        let visitors = rows(json!([
            { "date": "2024-03-15", "visitors": 120 },
            { "date": "2024-03-14", "visitors": 100 }
        ]));
        let purchases = rows(json!([
            { "purchases": 6, "subscriptions": "4", "one_time_purchases": "2" },
            { "purchases": 5, "subscriptions": "1", "one_time_purchases": "4" }
        ]));
        let offers = rows(json!([
            { "order_bumps": 2, "upsell_1s": 3, "upsell_2s": 1 }
        ]));
        let subscriptions = rows(json!([
            { "plan_name": "Basic Monthly", "count": 10 },
            { "plan_name": "Pro Monthly", "count": 25 }
        ]));

        let snapshot = snapshot_from_rows(&visitors, &purchases, &offers, &subscriptions).unwrap();
        assert_eq!(snapshot.visitors, 220);
        assert_eq!(snapshot.purchases, 11);
        assert_eq!(snapshot.new_subscribers, 5);
        assert_eq!(snapshot.one_time_purchases, 6);
        assert_eq!(snapshot.upsell1_accepted, 3);
        assert_eq!(snapshot.active_subscriptions, 35);
        assert_eq!(snapshot.subscription_plans[0].name, "Pro Monthly");
        assert_eq!(&snapshot.history.visitors[HISTORY_LENGTH - 2..], [100, 120]);
        assert_eq!(&snapshot.history.new_subscribers[HISTORY_LENGTH - 2..], [1, 4]);
        for (name, series) in snapshot.history.series() {
            assert_eq!(series.len(), HISTORY_LENGTH, "{name}");
        }
        assert!(snapshot.history.active_subscriptions.iter().all(|&n| n == 35));
        assert!(snapshot.history.visitors[..HISTORY_LENGTH - 2].iter().all(|&n| n == 0));
    }

    #[test]
    fn test_long_results_keep_newest_days() {
        let visitors: Vec<Row> = (0..HISTORY_LENGTH + 5)
            .map(|day| rows(json!([{ "visitors": day }])).remove(0))
            .collect();
        let snapshot = snapshot_from_rows(&visitors, &[], &[], &[]).unwrap();
        let history = &snapshot.history.visitors;
        assert_eq!(history.len(), HISTORY_LENGTH);
        assert_eq!(history.last(), Some(&0));
        assert_eq!(history.first().copied(), u64::try_from(HISTORY_LENGTH - 1).ok());
    }

    #[test]
    fn test_mongo_columns_are_renamed() {
        let row = rows(json!([{ "purchases": 3, "oneTimePurchases": 2 }])).remove(0);
        let row = mongo_purchase_columns(row);
        assert_eq!(count(&row, "one_time_purchases"), 2);
        assert!(!row.contains_key("oneTimePurchases"));
    }

    #[tokio::test]
    async fn test_stand_in_returns_no_snapshot() {
        for url in ["postgres://u:p@localhost/metrics", "mongodb://u:p@localhost/metrics"] {
            let service = service(url);
            let result = service
                .dashboard_data(Timeframe::Weekly, &Funnel::SubscriptionFunnel)
                .await
                .unwrap();
            assert!(result.is_none());
        }
    }

    #[tokio::test]
    async fn test_closed_connection_surfaces_error() {
        let service = service("postgres://u:p@localhost/metrics");
        service.connection().close();
        let result = service
            .dashboard_data(Timeframe::Daily, &Funnel::AllFunnels)
            .await;
        assert!(matches!(result, Err(DatabaseError::Closed)));
    }
}
