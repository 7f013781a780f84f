//! Generator commands.

use pulseboard_core::format::{metric_display_value, metric_id};
use pulseboard_core::{
    Funnel, Timeframe, TrendError, derive_metrics, engagement_metrics, generate_engagement,
    generate_funnel, generate_trend,
};
use rand::Rng;
use serde_json::{Value, json};

/// Funnel snapshot together with its derived metrics.
pub fn funnel<R: Rng + ?Sized>(rng: &mut R, timeframe: Timeframe, funnel: &Funnel) -> Value {
    let snapshot = generate_funnel(rng, timeframe, funnel);
    let metrics = derive_metrics(&snapshot);
    json!({
        "timeframe": timeframe,
        "funnel": funnel,
        "snapshot": snapshot,
        "metrics": metrics,
    })
}

/// Derived metrics as aligned `metric-id  value` lines.
pub fn funnel_summary<R: Rng + ?Sized>(rng: &mut R, timeframe: Timeframe, funnel: &Funnel) -> String {
    let metrics = derive_metrics(&generate_funnel(rng, timeframe, funnel));
    let mut out = format!("{funnel} ({timeframe})\n");
    for (name, value) in metrics.entries() {
        let display = metric_display_value(value, name.ends_with("Rate"));
        out.push_str(&format!("  {:<24}{display}\n", metric_id(name)));
    }
    out
}

pub fn engagement<R: Rng + ?Sized>(rng: &mut R, timeframe: Timeframe, funnel: &Funnel) -> Value {
    let snapshot = generate_engagement(rng, timeframe, funnel);
    json!({
        "timeframe": timeframe,
        "funnel": funnel,
        "metrics": engagement_metrics(&snapshot),
        "history": snapshot.history,
    })
}

/// # Errors
///
/// Returns `TrendError` for invalid parameters.
pub fn trend<R: Rng + ?Sized>(
    rng: &mut R,
    trend_percent: f64,
    points: usize,
    base_value: f64,
) -> Result<Value, TrendError> {
    let values = generate_trend(rng, trend_percent, points, base_value)?;
    Ok(json!({
        "trend": trend_percent,
        "points": points,
        "baseValue": base_value,
        "values": values,
    }))
}

pub fn funnels() -> Value {
    json!(Funnel::catalog())
}
