//! Synthetic metric generators.
//!
//! Every generator is a pure function of its arguments and the random source
//! handed to it. Passing a seeded [`rand::rngs::StdRng`] makes the output
//! reproducible; passing `rand::rng()` gives fresh values on every call.
//!
//! - [`generate_funnel`] - checkout-funnel volumes with 30-sample history
//! - [`generate_engagement`] - post engagement counts with 30-sample history
//! - [`generate_trend`] - noisy series sloping with a signed trend percentage

mod engagement;
mod funnel;
mod trend;

pub use engagement::{engagement_metrics, generate_engagement};
pub use funnel::{derive_metrics, generate_funnel};
pub use trend::{DEFAULT_TREND_BASE, DEFAULT_TREND_POINTS, TrendError, generate_trend};

use rand::Rng;

use crate::types::HISTORY_LENGTH;

/// Truncate a non-negative sample to a whole count.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Clamped to >= 0; samples stay far below u64::MAX
pub(crate) fn floor_count(value: f64) -> u64 {
    value.max(0.0).floor() as u64
}

#[allow(clippy::cast_precision_loss)] // Synthetic counts stay far below 2^52
pub(crate) const fn as_f64(count: u64) -> f64 {
    count as f64
}

/// `HISTORY_LENGTH` samples of `floor(value * U[0.8, 1.2) / multiplier)`.
pub(crate) fn scaled_history<R: Rng + ?Sized>(rng: &mut R, value: u64, multiplier: u32) -> Vec<u64> {
    let divisor = f64::from(multiplier);
    (0..HISTORY_LENGTH)
        .map(|_| floor_count(as_f64(value) * rng.random_range(0.8..1.2) / divisor))
        .collect()
}

/// Ratio as a percentage, 0 when the denominator is 0.
pub(crate) fn percent(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        as_f64(numerator) / as_f64(denominator) * 100.0
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_floor_count_clamps_negative() {
        assert_eq!(floor_count(-3.7), 0);
        assert_eq!(floor_count(12.99), 12);
    }

    #[test]
    fn test_percent_guards_zero() {
        assert_eq!(percent(5, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }

    #[test]
    fn test_scaled_history_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples = scaled_history(&mut rng, 7000, 7);
        assert_eq!(samples.len(), HISTORY_LENGTH);
        assert!(samples.iter().all(|&s| (800..1200).contains(&s)));
    }
}
