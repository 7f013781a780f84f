//! Application state shared across handlers.

use std::sync::Arc;

use crate::cache::ApiCache;
use crate::config::DashboardConfig;
use crate::db::{DatabaseConnection, DatabaseError, DatabaseService};
use crate::services::MetricsService;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; owns the configuration, the response cache
/// and the metrics service (random source plus optional metrics store).
#[derive(Clone, Debug)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: DashboardConfig,
    cache: ApiCache,
    metrics: MetricsService,
}

impl AppState {
    /// Build state from configuration, opening the metrics store if one is
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the metrics store connection cannot be opened.
    pub fn new(config: DashboardConfig) -> Result<Self, DatabaseError> {
        let database = config
            .database
            .clone()
            .map(DatabaseConnection::open)
            .transpose()?
            .map(DatabaseService::new);
        let metrics = MetricsService::new(config.rng_seed, database);
        let cache = ApiCache::new(&config.cache);
        Ok(Self::from_parts(config, cache, metrics))
    }

    /// Assemble state from pre-built components.
    #[must_use]
    pub fn from_parts(config: DashboardConfig, cache: ApiCache, metrics: MetricsService) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                cache,
                metrics,
            }),
        }
    }

    /// Get a reference to the dashboard configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Get a reference to the response cache.
    #[must_use]
    pub fn cache(&self) -> &ApiCache {
        &self.inner.cache
    }

    /// Get a reference to the metrics service.
    #[must_use]
    pub fn metrics(&self) -> &MetricsService {
        &self.inner.metrics
    }
}
