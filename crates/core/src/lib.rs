//! Pulseboard Core - Metric types and synthetic data generators.
//!
//! This crate provides everything the Pulseboard components share:
//! - `dashboard` - HTTP API serving funnel, engagement and society metrics
//! - `cli` - Command-line access to the generators
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no global state. Every generator takes its random source as an explicit
//! argument, so callers decide between OS entropy and a seeded generator.
//!
//! # Modules
//!
//! - [`types`] - Timeframes, funnels, snapshots, history series and the society catalog
//! - [`generate`] - Funnel, engagement and trend-series generators
//! - [`format`] - Display helpers for metric values

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod format;
pub mod generate;
pub mod types;

pub use generate::{
    DEFAULT_TREND_BASE, DEFAULT_TREND_POINTS, TrendError, derive_metrics, engagement_metrics,
    generate_engagement, generate_funnel, generate_trend,
};
pub use types::*;
