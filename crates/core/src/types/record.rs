//! Best-seen metric values per dashboard view.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::funnel::Funnel;
use super::timeframe::Timeframe;

/// Metric for which lower values are better.
const CHURN_RATE: &str = "churnRate";
/// Starting point for churn before any observation.
const CHURN_CEILING: f64 = 100.0;

/// Record value per metric, keyed by `"{timeframe}-{funnel}"`.
///
/// For every metric the record is the maximum observed value, except
/// `churnRate`, whose record is the minimum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordHighs {
    views: BTreeMap<String, BTreeMap<String, f64>>,
}

impl RecordHighs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// View key for a timeframe and funnel selection.
    #[must_use]
    pub fn key(timeframe: Timeframe, funnel: &Funnel) -> String {
        format!("{timeframe}-{funnel}")
    }

    /// Current record, if one has been set.
    #[must_use]
    pub fn get(&self, key: &str, metric: &str) -> Option<f64> {
        self.views.get(key)?.get(metric).copied()
    }

    /// Records for one view.
    #[must_use]
    pub fn view(&self, key: &str) -> Option<&BTreeMap<String, f64>> {
        self.views.get(key)
    }

    /// Compare `value` with the current record and store it if it wins.
    ///
    /// Returns `true` when a new record was set.
    pub fn observe(&mut self, key: &str, metric: &str, value: f64) -> bool {
        let lower_is_better = metric == CHURN_RATE;
        let view = self.views.entry(key.to_owned()).or_default();
        let current = view
            .get(metric)
            .copied()
            .unwrap_or(if lower_is_better { CHURN_CEILING } else { 0.0 });

        let improved = if lower_is_better {
            value < current
        } else {
            value > current
        };
        if improved {
            view.insert(metric.to_owned(), value);
        }
        improved
    }

    /// Observe every `(metric, value)` pair, returning the metrics that set records.
    pub fn observe_all<'a>(
        &mut self,
        key: &str,
        entries: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Vec<&'a str> {
        entries
            .into_iter()
            .filter(|&(metric, value)| self.observe(key, metric, value))
            .map(|(metric, _)| metric)
            .collect()
    }

    pub fn clear(&mut self) {
        self.views.clear();
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::IndividualFunnel;

    #[test]
    fn test_key_format() {
        assert_eq!(
            RecordHighs::key(Timeframe::Weekly, &Funnel::AllFunnels),
            "weekly-all-funnels"
        );
        assert_eq!(
            RecordHighs::key(
                Timeframe::Daily,
                &Funnel::Individual(IndividualFunnel::Webinar)
            ),
            "daily-Webinar Funnel"
        );
    }

    #[test]
    fn test_higher_values_set_records() {
        let mut records = RecordHighs::new();
        assert!(records.observe("daily-all-funnels", "visitors", 1200.0));
        assert!(!records.observe("daily-all-funnels", "visitors", 900.0));
        assert!(records.observe("daily-all-funnels", "visitors", 1500.0));
        assert_eq!(records.get("daily-all-funnels", "visitors"), Some(1500.0));
    }

    #[test]
    fn test_zero_never_sets_a_record() {
        let mut records = RecordHighs::new();
        assert!(!records.observe("k", "purchases", 0.0));
        assert_eq!(records.get("k", "purchases"), None);
    }

    #[test]
    fn test_churn_keeps_minimum() {
        let mut records = RecordHighs::new();
        assert!(records.observe("k", "churnRate", 4.2));
        assert!(!records.observe("k", "churnRate", 5.0));
        assert!(records.observe("k", "churnRate", 1.3));
        assert_eq!(records.get("k", "churnRate"), Some(1.3));
    }

    #[test]
    fn test_views_are_independent() {
        let mut records = RecordHighs::new();
        records.observe("daily-all-funnels", "visitors", 10.0);
        assert!(records.observe("weekly-all-funnels", "visitors", 5.0));
        assert_eq!(records.get("daily-all-funnels", "visitors"), Some(10.0));
    }

    #[test]
    fn test_observe_all_reports_new_records() {
        let mut records = RecordHighs::new();
        records.observe("k", "visitors", 100.0);
        let improved = records.observe_all(
            "k",
            [("visitors", 50.0), ("purchases", 3.0), ("churnRate", 2.0)],
        );
        assert_eq!(improved, vec!["purchases", "churnRate"]);
    }
}
