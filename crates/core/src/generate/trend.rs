//! Noisy trend series for society KPIs.

use rand::Rng;
use thiserror::Error;

/// Default number of points in a trend series.
pub const DEFAULT_TREND_POINTS: usize = 30;
/// Default starting value of a trend series.
pub const DEFAULT_TREND_BASE: f64 = 50.0;

/// Invalid trend parameters.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TrendError {
    #[error("Points must be at least 1")]
    NoPoints,

    #[error("Base value must be a non-negative number")]
    InvalidBase,

    #[error("Trend must be a finite number")]
    InvalidTrend,

    #[error("Trend values exceed the representable range")]
    Overflow,
}

/// Generate `points` values that start at `base_value` and drift by
/// `trend_percent` over the series.
///
/// Noise is biased slightly in the trend's direction so short series still
/// read as rising or falling. Values are rounded and never negative.
///
/// # Errors
///
/// Returns [`TrendError`] when `points` is 0, `base_value` is negative or not
/// finite, or `trend_percent` is not finite. Returns [`TrendError::Overflow`]
/// when a generated value does not fit in an `f64`.
pub fn generate_trend<R: Rng + ?Sized>(
    rng: &mut R,
    trend_percent: f64,
    points: usize,
    base_value: f64,
) -> Result<Vec<f64>, TrendError> {
    if points == 0 {
        return Err(TrendError::NoPoints);
    }
    if !base_value.is_finite() || base_value < 0.0 {
        return Err(TrendError::InvalidBase);
    }
    if !trend_percent.is_finite() {
        return Err(TrendError::InvalidTrend);
    }

    let trend_factor = if trend_percent >= 0.0 { 0.45 } else { 0.55 };
    #[allow(clippy::cast_precision_loss)] // Point counts are small
    let step = (trend_percent / 100.0) * (base_value / points as f64);
    let noise_scale = base_value / 5.0;

    let mut series = Vec::with_capacity(points);
    series.push(base_value);
    for i in 1..points {
        let noise = (rng.random::<f64>() - trend_factor) * noise_scale;
        #[allow(clippy::cast_precision_loss)]
        let increment = step * i as f64;
        let value = (base_value + increment + noise).round().max(0.0);
        if !value.is_finite() {
            return Err(TrendError::Overflow);
        }
        series.push(value);
    }
    Ok(series)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_length_and_first_value() {
        let mut rng = StdRng::seed_from_u64(30);
        let series = generate_trend(&mut rng, 10.0, 5, 100.0).unwrap();
        assert_eq!(series.len(), 5);
        assert_eq!(series[0], 100.0);
        assert!(series.iter().all(|&v| v >= 0.0));
        assert!(series[1..].iter().all(|v| v.fract() == 0.0));
    }

    #[test]
    fn test_single_point_is_base() {
        let mut rng = StdRng::seed_from_u64(31);
        assert_eq!(generate_trend(&mut rng, -4.0, 1, 12.5).unwrap(), vec![12.5]);
    }

    #[test]
    fn test_defaults() {
        let mut rng = StdRng::seed_from_u64(32);
        let series = generate_trend(&mut rng, 2.0, DEFAULT_TREND_POINTS, DEFAULT_TREND_BASE).unwrap();
        assert_eq!(series.len(), 30);
        assert_eq!(series[0], 50.0);
    }

    #[test]
    fn test_zero_base_stays_zero() {
        let mut rng = StdRng::seed_from_u64(33);
        let series = generate_trend(&mut rng, 25.0, 10, 0.0).unwrap();
        assert!(series.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_steep_decline_clamps_at_zero() {
        let mut rng = StdRng::seed_from_u64(34);
        let series = generate_trend(&mut rng, -500.0, 20, 10.0).unwrap();
        assert!(series.iter().all(|&v| v >= 0.0));
        assert_eq!(*series.last().unwrap(), 0.0);
    }

    #[test]
    fn test_rejects_invalid_arguments() {
        let mut rng = StdRng::seed_from_u64(35);
        assert_eq!(generate_trend(&mut rng, 1.0, 0, 50.0), Err(TrendError::NoPoints));
        assert_eq!(generate_trend(&mut rng, 1.0, 5, -1.0), Err(TrendError::InvalidBase));
        assert_eq!(generate_trend(&mut rng, 1.0, 5, f64::NAN), Err(TrendError::InvalidBase));
        assert_eq!(
            generate_trend(&mut rng, f64::INFINITY, 5, 50.0),
            Err(TrendError::InvalidTrend)
        );
    }

    #[test]
    fn test_overflowing_values_are_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            generate_trend(&mut rng, 100.0, 2, 1.7e308),
            Err(TrendError::Overflow)
        );
        let series = generate_trend(&mut rng, 100.0, 2, 1.0e300).unwrap();
        assert!(series.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_positive_trend_ends_higher_on_average() {
        let mut rng = StdRng::seed_from_u64(36);
        let runs = 500;
        let mut mean_last = |trend: f64| -> f64 {
            (0..runs)
                .map(|_| generate_trend(&mut rng, trend, 5, 100.0).unwrap()[4])
                .sum::<f64>()
                / f64::from(runs)
        };
        let rising = mean_last(10.0);
        let falling = mean_last(-10.0);
        assert!(rising > falling, "rising={rising} falling={falling}");
    }

    #[test]
    fn test_same_seed_reproduces_series() {
        let a = generate_trend(&mut StdRng::seed_from_u64(37), 3.5, 12, 80.0).unwrap();
        let b = generate_trend(&mut StdRng::seed_from_u64(37), 3.5, 12, 80.0).unwrap();
        assert_eq!(a, b);
    }
}
