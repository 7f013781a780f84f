//! Checkout-funnel generator.

use rand::Rng;

use super::{as_f64, floor_count, percent, scaled_history};
use crate::types::{DerivedMetrics, Funnel, FunnelHistory, FunnelSnapshot, SubscriptionPlan, Timeframe};

/// Subscription plans and their share of active subscriptions.
const SUBSCRIPTION_PLAN_SHARES: [(&str, f64); 5] = [
    ("Pro Monthly", 0.4),
    ("Basic Monthly", 0.25),
    ("Pro Yearly", 0.2),
    ("Basic Yearly", 0.1),
    ("Enterprise", 0.05),
];

/// Per-sample conversion rates before volumes are drawn.
#[derive(Debug, Clone, Copy)]
struct BaseRates {
    conversion: f64,
    bump: f64,
    upsell1: f64,
    subscription_ratio: f64,
}

impl BaseRates {
    fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            conversion: rng.random_range(0.02..0.06),
            bump: rng.random_range(0.1..0.3),
            upsell1: rng.random_range(0.05..0.2),
            subscription_ratio: rng.random_range(0.3..0.7),
        }
    }

    /// Skew rates toward the character of the selected funnel.
    fn adjust_for(&mut self, funnel: &Funnel) {
        match funnel {
            Funnel::SubscriptionFunnel => {
                self.conversion *= 1.2;
                self.upsell1 *= 1.3;
                self.subscription_ratio = 0.9;
            }
            Funnel::OneTimeFunnel => {
                self.conversion *= 0.9;
                self.bump *= 1.4;
                self.subscription_ratio = 0.1;
            }
            Funnel::Individual(individual) => {
                let offset = f64::from(individual.index()) - 5.0;
                self.conversion *= 1.0 + offset / 20.0;
                self.subscription_ratio *= 1.0 + offset / 10.0;
            }
            Funnel::AllFunnels | Funnel::IndividualFunnels | Funnel::Other(_) => {}
        }
    }
}

/// Generate one funnel snapshot for `timeframe` and `funnel`.
///
/// Volumes scale with the timeframe's day count; history samples are
/// per-day values jittered ±20% around the snapshot.
pub fn generate_funnel<R: Rng + ?Sized>(
    rng: &mut R,
    timeframe: Timeframe,
    funnel: &Funnel,
) -> FunnelSnapshot {
    let multiplier = timeframe.multiplier();
    let scale = f64::from(multiplier);

    let mut rates = BaseRates::draw(rng);
    rates.adjust_for(funnel);

    let visitors = floor_count(rng.random_range(1000.0..3000.0)) * u64::from(multiplier);
    let purchases = floor_count(as_f64(visitors) * rates.conversion);
    let new_subscribers = floor_count(as_f64(purchases) * rates.subscription_ratio).min(purchases);
    let one_time_purchases = purchases - new_subscribers;
    let churn_rate = rng.random_range(1.0..6.0);
    let order_bumps_accepted = floor_count(as_f64(purchases) * rates.bump).min(purchases);
    let upsell1_accepted = floor_count(as_f64(purchases) * rates.upsell1).min(purchases);
    let upsell2_accepted =
        floor_count(as_f64(upsell1_accepted) * rng.random_range(0.1..0.5)).min(upsell1_accepted);
    let active_subscriptions =
        floor_count(as_f64(new_subscribers) * scale * 0.8 + rng.random_range(0.0..500.0));

    let subscription_plans = subscription_plans(active_subscriptions);

    let history = FunnelHistory {
        visitors: scaled_history(rng, visitors, multiplier),
        purchases: scaled_history(rng, purchases, multiplier),
        new_subscribers: scaled_history(rng, new_subscribers, multiplier),
        one_time_purchases: scaled_history(rng, one_time_purchases, multiplier),
        active_subscriptions: scaled_history(rng, active_subscriptions, multiplier),
        order_bumps_accepted: scaled_history(rng, order_bumps_accepted, multiplier),
        upsell1_accepted: scaled_history(rng, upsell1_accepted, multiplier),
        upsell2_accepted: scaled_history(rng, upsell2_accepted, multiplier),
    };

    FunnelSnapshot {
        visitors,
        purchases,
        one_time_purchases,
        new_subscribers,
        churn_rate,
        order_bumps_accepted,
        upsell1_accepted,
        upsell2_accepted,
        active_subscriptions,
        subscription_plans,
        history,
    }
}

/// Split active subscriptions across the fixed plans, largest first.
fn subscription_plans(active_subscriptions: u64) -> Vec<SubscriptionPlan> {
    let mut plans: Vec<SubscriptionPlan> = SUBSCRIPTION_PLAN_SHARES
        .iter()
        .map(|&(name, share)| SubscriptionPlan {
            name: name.to_owned(),
            count: floor_count(as_f64(active_subscriptions) * share),
        })
        .collect();
    plans.sort_by(|a, b| b.count.cmp(&a.count));
    plans
}

/// Project a snapshot into conversion and offer-acceptance rates.
#[must_use]
pub fn derive_metrics(snapshot: &FunnelSnapshot) -> DerivedMetrics {
    DerivedMetrics {
        visitors: snapshot.visitors,
        purchases: snapshot.purchases,
        conversion_rate: percent(snapshot.purchases, snapshot.visitors),
        new_subscribers: snapshot.new_subscribers,
        active_subscriptions: snapshot.active_subscriptions,
        one_time_purchases: snapshot.one_time_purchases,
        churn_rate: snapshot.churn_rate,
        order_bump_rate: percent(snapshot.order_bumps_accepted, snapshot.purchases),
        upsell1_rate: percent(snapshot.upsell1_accepted, snapshot.purchases),
        upsell2_rate: percent(snapshot.upsell2_accepted, snapshot.upsell1_accepted),
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::cast_precision_loss)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::types::{HISTORY_LENGTH, IndividualFunnel};

    fn all_funnels() -> Vec<Funnel> {
        let mut funnels = vec![
            Funnel::AllFunnels,
            Funnel::SubscriptionFunnel,
            Funnel::OneTimeFunnel,
            Funnel::IndividualFunnels,
            Funnel::Other("Affiliate Funnel".to_string()),
        ];
        funnels.extend(IndividualFunnel::ALL.map(Funnel::Individual));
        funnels
    }

    fn empty_snapshot() -> FunnelSnapshot {
        FunnelSnapshot {
            visitors: 0,
            purchases: 0,
            one_time_purchases: 0,
            new_subscribers: 0,
            churn_rate: 2.5,
            order_bumps_accepted: 0,
            upsell1_accepted: 0,
            upsell2_accepted: 0,
            active_subscriptions: 0,
            subscription_plans: Vec::new(),
            history: FunnelHistory::default(),
        }
    }

    #[test]
    fn test_purchases_split_exactly() {
        let mut rng = StdRng::seed_from_u64(1);
        for timeframe in Timeframe::ALL {
            for funnel in all_funnels() {
                for _ in 0..20 {
                    let s = generate_funnel(&mut rng, timeframe, &funnel);
                    assert_eq!(s.purchases, s.new_subscribers + s.one_time_purchases);
                }
            }
        }
    }

    #[test]
    fn test_offer_acceptances_bounded() {
        let mut rng = StdRng::seed_from_u64(2);
        for funnel in all_funnels() {
            for _ in 0..50 {
                let s = generate_funnel(&mut rng, Timeframe::Weekly, &funnel);
                assert!(s.upsell2_accepted <= s.upsell1_accepted);
                assert!(s.upsell1_accepted <= s.purchases);
                assert!(s.order_bumps_accepted <= s.purchases);
                assert!((1.0..6.0).contains(&s.churn_rate));
            }
        }
    }

    #[test]
    fn test_visitors_scale_with_timeframe() {
        let mut rng = StdRng::seed_from_u64(3);
        for timeframe in Timeframe::ALL {
            let s = generate_funnel(&mut rng, timeframe, &Funnel::AllFunnels);
            let per_day = s.visitors / u64::from(timeframe.multiplier());
            assert_eq!(s.visitors % u64::from(timeframe.multiplier()), 0);
            assert!((1000..3000).contains(&per_day));
        }
    }

    #[test]
    fn test_subscription_plans_sorted_and_bounded() {
        let mut rng = StdRng::seed_from_u64(4);
        for funnel in all_funnels() {
            let s = generate_funnel(&mut rng, Timeframe::Monthly, &funnel);
            assert_eq!(s.subscription_plans.len(), 5);
            assert!(
                s.subscription_plans
                    .windows(2)
                    .all(|pair| pair[0].count >= pair[1].count)
            );
            let total: u64 = s.subscription_plans.iter().map(|p| p.count).sum();
            assert!(total <= s.active_subscriptions);
            // Each plan loses less than one subscriber to flooring.
            assert!(s.active_subscriptions - total < 5);
        }
    }

    #[test]
    fn test_plan_split_for_known_total() {
        let plans = subscription_plans(1000);
        let counts: Vec<(&str, u64)> = plans.iter().map(|p| (p.name.as_str(), p.count)).collect();
        assert_eq!(
            counts,
            vec![
                ("Pro Monthly", 400),
                ("Basic Monthly", 250),
                ("Pro Yearly", 200),
                ("Basic Yearly", 100),
                ("Enterprise", 50),
            ]
        );
    }

    #[test]
    fn test_history_shape() {
        let mut rng = StdRng::seed_from_u64(5);
        let s = generate_funnel(&mut rng, Timeframe::Daily, &Funnel::SubscriptionFunnel);
        for (name, series) in s.history.series() {
            assert_eq!(series.len(), HISTORY_LENGTH, "{name} has wrong length");
        }
    }

    #[test]
    fn test_history_jitters_around_daily_value() {
        let mut rng = StdRng::seed_from_u64(6);
        let s = generate_funnel(&mut rng, Timeframe::Weekly, &Funnel::AllFunnels);
        let per_day = s.visitors as f64 / 7.0;
        for &sample in &s.history.visitors {
            let sample = sample as f64;
            assert!(sample + 1.0 >= per_day * 0.8);
            assert!(sample <= per_day * 1.2);
        }
    }

    #[test]
    fn test_same_seed_reproduces_snapshot() {
        let a = generate_funnel(&mut StdRng::seed_from_u64(42), Timeframe::Weekly, &Funnel::OneTimeFunnel);
        let b = generate_funnel(&mut StdRng::seed_from_u64(42), Timeframe::Weekly, &Funnel::OneTimeFunnel);
        assert_eq!(a, b);
    }

    #[test]
    fn test_repeated_calls_differ_but_keep_shape() {
        let mut rng = StdRng::seed_from_u64(8);
        let a = generate_funnel(&mut rng, Timeframe::Daily, &Funnel::AllFunnels);
        let b = generate_funnel(&mut rng, Timeframe::Daily, &Funnel::AllFunnels);
        assert_ne!(a.history, b.history);
        assert_eq!(a.history.visitors.len(), b.history.visitors.len());
        assert_eq!(a.subscription_plans.len(), b.subscription_plans.len());
    }

    #[test]
    fn test_one_time_funnel_has_far_fewer_subscribers() {
        let mut rng = StdRng::seed_from_u64(9);
        let trials = 200;
        let mean = |rng: &mut StdRng, funnel: &Funnel| -> f64 {
            (0..trials)
                .map(|_| generate_funnel(rng, Timeframe::Daily, funnel).new_subscribers as f64)
                .sum::<f64>()
                / f64::from(trials)
        };
        let one_time = mean(&mut rng, &Funnel::OneTimeFunnel);
        let subscription = mean(&mut rng, &Funnel::SubscriptionFunnel);
        assert!(
            subscription > one_time * 5.0,
            "subscription={subscription} one_time={one_time}"
        );
    }

    #[test]
    fn test_individual_funnel_skews_conversion() {
        let mut rng = StdRng::seed_from_u64(10);
        let trials = 300;
        let mut mean_conversion = |funnel: IndividualFunnel| -> f64 {
            (0..trials)
                .map(|_| {
                    let s = generate_funnel(&mut rng, Timeframe::Monthly, &Funnel::Individual(funnel));
                    derive_metrics(&s).conversion_rate
                })
                .sum::<f64>()
                / f64::from(trials)
        };
        let first = mean_conversion(IndividualFunnel::LeadMagnet);
        let last = mean_conversion(IndividualFunnel::Membership);
        assert!(last > first, "last={last} first={first}");
    }

    #[test]
    fn test_unknown_funnel_behaves_like_all_funnels() {
        let known = generate_funnel(&mut StdRng::seed_from_u64(11), Timeframe::Daily, &Funnel::AllFunnels);
        let unknown = generate_funnel(
            &mut StdRng::seed_from_u64(11),
            Timeframe::Daily,
            &Funnel::from_identifier("Affiliate Funnel"),
        );
        assert_eq!(known, unknown);
    }

    #[test]
    fn test_derive_metrics_ratios() {
        let snapshot = FunnelSnapshot {
            visitors: 2000,
            purchases: 80,
            one_time_purchases: 30,
            new_subscribers: 50,
            order_bumps_accepted: 20,
            upsell1_accepted: 10,
            upsell2_accepted: 4,
            active_subscriptions: 300,
            ..empty_snapshot()
        };
        let metrics = derive_metrics(&snapshot);
        assert_eq!(metrics.conversion_rate, 4.0);
        assert_eq!(metrics.order_bump_rate, 25.0);
        assert_eq!(metrics.upsell1_rate, 12.5);
        assert_eq!(metrics.upsell2_rate, 40.0);
        assert_eq!(metrics.churn_rate, 2.5);
        assert_eq!(metrics.active_subscriptions, 300);
    }

    #[test]
    fn test_derive_metrics_zero_denominators() {
        let metrics = derive_metrics(&empty_snapshot());
        assert_eq!(metrics.conversion_rate, 0.0);
        assert_eq!(metrics.order_bump_rate, 0.0);
        assert_eq!(metrics.upsell1_rate, 0.0);
        assert_eq!(metrics.upsell2_rate, 0.0);

        let only_visitors = FunnelSnapshot {
            visitors: 500,
            purchases: 10,
            upsell1_accepted: 0,
            upsell2_accepted: 0,
            ..empty_snapshot()
        };
        assert_eq!(derive_metrics(&only_visitors).upsell2_rate, 0.0);
        assert_eq!(derive_metrics(&only_visitors).conversion_rate, 2.0);
    }
}
