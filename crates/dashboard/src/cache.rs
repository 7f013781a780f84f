//! In-memory response cache.
//!
//! Dashboard, engagement and history payloads are cached per parameter set
//! for a fixed TTL (5 minutes by default) so repeated polls of the same view
//! return identical numbers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use pulseboard_core::{Funnel, HistoryMetric, Timeframe};

use crate::config::CacheConfig;
use crate::models::{DashboardView, EngagementView, HistoryView};

/// Cache key for generated views.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Dashboard {
        timeframe: Timeframe,
        funnel: Funnel,
    },
    Engagement {
        timeframe: Timeframe,
        funnel: Funnel,
    },
    History {
        metric: HistoryMetric,
        timeframe: Timeframe,
        funnel: Funnel,
        days: u16,
    },
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Dashboard(Arc<DashboardView>),
    Engagement(Arc<EngagementView>),
    History(Arc<HistoryView>),
}

/// TTL cache owned by the application state.
///
/// When disabled, every lookup misses and inserts are dropped.
#[derive(Clone)]
pub struct ApiCache {
    inner: Option<Cache<CacheKey, CacheValue>>,
}

impl std::fmt::Debug for ApiCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCache")
            .field("enabled", &self.is_enabled())
            .field("entries", &self.entry_count())
            .finish()
    }
}

impl ApiCache {
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let inner = config.enabled.then(|| {
            Cache::builder()
                .max_capacity(config.max_capacity)
                .time_to_live(config.ttl)
                .build()
        });
        Self { inner }
    }

    /// Cache that never stores anything.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { inner: None }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    pub async fn get(&self, key: &CacheKey) -> Option<CacheValue> {
        let value = self.inner.as_ref()?.get(key).await;
        if value.is_some() {
            tracing::debug!(?key, "Cache hit");
        }
        value
    }

    pub async fn insert(&self, key: CacheKey, value: CacheValue) {
        if let Some(cache) = &self.inner {
            cache.insert(key, value).await;
        }
    }

    /// Drop every cached entry.
    pub async fn clear(&self) {
        if let Some(cache) = &self.inner {
            cache.invalidate_all();
            cache.run_pending_tasks().await;
        }
    }

    /// Approximate number of live entries.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.as_ref().map_or(0, Cache::entry_count)
    }

    /// Configured time-to-live, if caching is enabled.
    #[must_use]
    pub fn ttl(&self) -> Option<Duration> {
        self.inner.as_ref().and_then(|cache| cache.policy().time_to_live())
    }
}
