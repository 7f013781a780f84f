//! Core types for Pulseboard.
//!
//! This module provides type-safe wrappers for the dashboard's domain concepts.

pub mod engagement;
pub mod funnel;
pub mod history;
pub mod record;
pub mod snapshot;
pub mod society;
pub mod timeframe;

use thiserror::Error;

pub use engagement::{EngagementHistory, EngagementMetrics, EngagementSnapshot};
pub use funnel::{Funnel, FunnelDescriptor, FunnelKind, IndividualFunnel};
pub use history::{HistoryMetric, MetricUnit};
pub use record::RecordHighs;
pub use snapshot::{DerivedMetrics, FunnelHistory, FunnelSnapshot, SubscriptionPlan};
pub use society::{SocietyFilter, SocietyMetric, SocietySection, SocietyTimeframe};
pub use timeframe::Timeframe;

/// Number of samples in every generated history series.
pub const HISTORY_LENGTH: usize = 30;

/// Errors produced when parsing identifiers received from callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid timeframe: {0}")]
    Timeframe(String),
    #[error("invalid funnel type: {0}")]
    Funnel(String),
    #[error("invalid metric: {0}")]
    HistoryMetric(String),
    #[error("invalid society timeframe: {0}")]
    SocietyTimeframe(String),
    #[error("invalid society filter: {0}")]
    SocietyFilter(String),
}
