//! Post engagement generator.

use rand::Rng;

use super::{as_f64, floor_count, scaled_history};
use crate::types::{
    EngagementHistory, EngagementMetrics, EngagementSnapshot, Funnel, HISTORY_LENGTH, Timeframe,
};

/// Generate one engagement snapshot for `timeframe`.
///
/// The funnel selection does not influence engagement; it is accepted so
/// callers can pass the same selection to every generator.
pub fn generate_engagement<R: Rng + ?Sized>(
    rng: &mut R,
    timeframe: Timeframe,
    _funnel: &Funnel,
) -> EngagementSnapshot {
    let multiplier = timeframe.multiplier();

    let number_of_posts = floor_count(rng.random_range(20.0..70.0)) * u64::from(multiplier);
    let posts = as_f64(number_of_posts);
    let number_of_post_likes = floor_count(posts * rng.random_range(100.0..300.0));
    let number_of_comments = floor_count(as_f64(number_of_post_likes) * rng.random_range(0.1..0.4));
    let reach = floor_count(posts * rng.random_range(500.0..1500.0));
    let impressions = floor_count(as_f64(reach) * rng.random_range(1.5..3.5));
    let shares = floor_count(posts * rng.random_range(5.0..25.0));

    let engagement_rate = if reach == 0 {
        0.0
    } else {
        as_f64(number_of_post_likes + number_of_comments) / as_f64(reach) * 100.0
    };

    let history = EngagementHistory {
        number_of_posts: scaled_history(rng, number_of_posts, multiplier),
        number_of_post_likes: scaled_history(rng, number_of_post_likes, multiplier),
        number_of_comments: scaled_history(rng, number_of_comments, multiplier),
        engagement_rate: (0..HISTORY_LENGTH)
            .map(|_| (engagement_rate * rng.random_range(0.8..1.2)).max(0.0))
            .collect(),
        reach: scaled_history(rng, reach, multiplier),
        impressions: scaled_history(rng, impressions, multiplier),
        shares: scaled_history(rng, shares, multiplier),
    };

    EngagementSnapshot {
        number_of_posts,
        number_of_post_likes,
        number_of_comments,
        engagement_rate,
        reach,
        impressions,
        shares,
        history,
    }
}

#[must_use]
pub const fn engagement_metrics(snapshot: &EngagementSnapshot) -> EngagementMetrics {
    EngagementMetrics {
        number_of_posts: snapshot.number_of_posts,
        number_of_post_likes: snapshot.number_of_post_likes,
        number_of_comments: snapshot.number_of_comments,
        engagement_rate: snapshot.engagement_rate,
        reach: snapshot.reach,
        impressions: snapshot.impressions,
        shares: snapshot.shares,
    }
}
