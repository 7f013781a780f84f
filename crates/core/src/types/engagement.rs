//! Social and content engagement snapshot.

use serde::{Deserialize, Serialize};

/// One generated sample of engagement counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementSnapshot {
    pub number_of_posts: u64,
    pub number_of_post_likes: u64,
    pub number_of_comments: u64,
    /// `(likes + comments) / reach * 100`.
    pub engagement_rate: f64,
    pub reach: u64,
    pub impressions: u64,
    pub shares: u64,
    pub history: EngagementHistory,
}

/// Per-period samples for each engagement metric.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementHistory {
    pub number_of_posts: Vec<u64>,
    pub number_of_post_likes: Vec<u64>,
    pub number_of_comments: Vec<u64>,
    /// Unscaled rate samples; the only fractional series.
    pub engagement_rate: Vec<f64>,
    pub reach: Vec<u64>,
    pub impressions: Vec<u64>,
    pub shares: Vec<u64>,
}

/// Engagement snapshot without its history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    pub number_of_posts: u64,
    pub number_of_post_likes: u64,
    pub number_of_comments: u64,
    pub engagement_rate: f64,
    pub reach: u64,
    pub impressions: u64,
    pub shares: u64,
}

impl EngagementMetrics {
    /// Every metric as `(wire name, value)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Synthetic counts stay far below 2^52
    pub fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("numberOfPosts", self.number_of_posts as f64),
            ("numberOfPostLikes", self.number_of_post_likes as f64),
            ("numberOfComments", self.number_of_comments as f64),
            ("engagementRate", self.engagement_rate),
            ("reach", self.reach as f64),
            ("impressions", self.impressions as f64),
            ("shares", self.shares as f64),
        ]
    }
}
