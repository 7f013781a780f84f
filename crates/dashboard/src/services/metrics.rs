//! Metrics source for the API.
//!
//! Reads funnel snapshots from the metrics store when one is configured and
//! falls back to the synthetic generators whenever the store has nothing to
//! offer. Engagement and trend data always come from the generators.

use std::sync::Mutex;

use pulseboard_core::{
    EngagementSnapshot, Funnel, FunnelSnapshot, Timeframe, TrendError, generate_engagement,
    generate_funnel, generate_trend,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::db::DatabaseService;

/// Errors from the metrics service.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error(transparent)]
    Trend(#[from] TrendError),

    #[error("random source lock poisoned")]
    RandomSourcePoisoned,
}

impl MetricsError {
    /// Whether the caller supplied the bad input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Trend(_))
    }
}

/// Shared random source plus optional metrics store.
#[derive(Debug)]
pub struct MetricsService {
    rng: Mutex<StdRng>,
    database: Option<DatabaseService>,
}

impl MetricsService {
    /// Create a service seeded with `seed`, or from OS entropy when `None`.
    #[must_use]
    pub fn new(seed: Option<u64>, database: Option<DatabaseService>) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            rng: Mutex::new(rng),
            database,
        }
    }

    #[must_use]
    pub const fn database(&self) -> Option<&DatabaseService> {
        self.database.as_ref()
    }

    /// Run `f` with exclusive access to the random source.
    ///
    /// The lock is released before this returns, so callers never hold it
    /// across an `.await`.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::RandomSourcePoisoned` if a previous holder panicked.
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> Result<T, MetricsError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| MetricsError::RandomSourcePoisoned)?;
        Ok(f(&mut rng))
    }

    /// Funnel snapshot from the store, or generated when the store is absent,
    /// empty or failing.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError` if the random source is unusable.
    pub async fn funnel_snapshot(
        &self,
        timeframe: Timeframe,
        funnel: &Funnel,
    ) -> Result<FunnelSnapshot, MetricsError> {
        if let Some(database) = &self.database {
            match database.dashboard_data(timeframe, funnel).await {
                Ok(Some(snapshot)) => return Ok(snapshot),
                Ok(None) => {
                    tracing::warn!(%timeframe, %funnel, "No stored metrics, using generated data");
                }
                Err(err) => {
                    tracing::warn!(error = %err, %timeframe, %funnel, "Metrics store unavailable, using generated data");
                }
            }
        }
        self.with_rng(|rng| generate_funnel(rng, timeframe, funnel))
    }

    /// # Errors
    ///
    /// Returns `MetricsError` if the random source is unusable.
    pub fn engagement(
        &self,
        timeframe: Timeframe,
        funnel: &Funnel,
    ) -> Result<EngagementSnapshot, MetricsError> {
        self.with_rng(|rng| generate_engagement(rng, timeframe, funnel))
    }

    /// # Errors
    ///
    /// Returns `MetricsError::Trend` for invalid parameters.
    pub fn trend(
        &self,
        trend_percent: f64,
        points: usize,
        base_value: f64,
    ) -> Result<Vec<f64>, MetricsError> {
        Ok(self.with_rng(|rng| generate_trend(rng, trend_percent, points, base_value))??)
    }

    /// Close the metrics store connection, if any.
    pub fn close(&self) {
        if let Some(database) = &self.database {
            database.connection().close();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use pulseboard_core::HISTORY_LENGTH;

    use super::*;
    use crate::db::{DatabaseConfig, DatabaseConnection};

    fn with_database(seed: u64) -> MetricsService {
        let config = DatabaseConfig::from_url("postgres://u:p@localhost/metrics").unwrap();
        let database = DatabaseService::new(DatabaseConnection::open(config).unwrap());
        MetricsService::new(Some(seed), Some(database))
    }

    #[tokio::test]
    async fn test_seeded_service_is_reproducible() {
        let a = MetricsService::new(Some(9), None);
        let b = MetricsService::new(Some(9), None);
        let funnel = Funnel::AllFunnels;
        assert_eq!(
            a.funnel_snapshot(Timeframe::Daily, &funnel).await.unwrap(),
            b.funnel_snapshot(Timeframe::Daily, &funnel).await.unwrap()
        );
        assert_eq!(
            a.trend(5.0, 10, 50.0).unwrap(),
            b.trend(5.0, 10, 50.0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_empty_store_falls_back_to_generator() {
        let service = with_database(3);
        let snapshot = service
            .funnel_snapshot(Timeframe::Weekly, &Funnel::SubscriptionFunnel)
            .await
            .unwrap();
        assert_eq!(snapshot.history.visitors.len(), HISTORY_LENGTH);
        assert!(snapshot.visitors > 0);
    }

    #[tokio::test]
    async fn test_failing_store_falls_back_to_generator() {
        let service = with_database(4);
        service.close();
        assert!(!service.database().unwrap().connection().is_open());
        let snapshot = service
            .funnel_snapshot(Timeframe::Daily, &Funnel::AllFunnels)
            .await
            .unwrap();
        assert_eq!(
            snapshot.purchases,
            snapshot.new_subscribers + snapshot.one_time_purchases
        );
    }

    #[test]
    fn test_trend_errors_propagate() {
        let service = MetricsService::new(Some(1), None);
        assert!(matches!(
            service.trend(1.0, 0, 50.0),
            Err(MetricsError::Trend(TrendError::NoPoints))
        ));
        assert!(service.trend(1.0, 0, 50.0).unwrap_err().is_client_error());
    }

    #[test]
    fn test_engagement_is_generated() {
        let service = MetricsService::new(Some(2), None);
        let snapshot = service.engagement(Timeframe::Monthly, &Funnel::AllFunnels).unwrap();
        assert_eq!(snapshot.history.shares.len(), HISTORY_LENGTH);
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let service = std::sync::Arc::new(MetricsService::new(Some(5), None));
        let poisoner = std::sync::Arc::clone(&service);
        let _ = std::thread::spawn(move || {
            let _ = poisoner.with_rng(|_| panic!("poison"));
        })
        .join();
        assert!(matches!(
            service.trend(1.0, 3, 10.0),
            Err(MetricsError::RandomSourcePoisoned)
        ));
    }
}
