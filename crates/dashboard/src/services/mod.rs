//! Business logic services.

pub mod metrics;

pub use metrics::{MetricsError, MetricsService};
