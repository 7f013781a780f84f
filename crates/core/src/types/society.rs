//! Society KPI catalog.
//!
//! Static headline values and trend percentages for the society dashboard.
//! Each metric's sparkline is produced on demand by the trend generator.

use serde::{Deserialize, Serialize};

use super::ParseError;

/// A society dashboard KPI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocietyMetric {
    pub title: &'static str,
    /// Pre-formatted headline value.
    pub value: &'static str,
    /// Signed change in percent.
    pub trend: f64,
    pub unit: &'static str,
    pub key_metric: bool,
    pub priority: bool,
    pub description: &'static str,
}

const fn key(
    title: &'static str,
    value: &'static str,
    trend: f64,
    unit: &'static str,
    description: &'static str,
) -> SocietyMetric {
    SocietyMetric {
        title,
        value,
        trend,
        unit,
        key_metric: true,
        priority: false,
        description,
    }
}

const fn metric(
    title: &'static str,
    value: &'static str,
    trend: f64,
    unit: &'static str,
    priority: bool,
    description: &'static str,
) -> SocietyMetric {
    SocietyMetric {
        title,
        value,
        trend,
        unit,
        key_metric: false,
        priority,
        description,
    }
}

static KEY_METRICS: [SocietyMetric; 5] = [
    key(
        "New Signups",
        "1,280",
        12.0,
        "",
        "What: The total count of new, unique user accounts created. How: Counted on successful completion of the registration process. Ex: Counts a new user signing up via email. Does not count a returning user logging in.",
    ),
    key(
        "Daily Active Users (DAU)",
        "18.5k",
        8.0,
        "",
        "What: Unique users who engaged with the platform in a 24-hour period. How: Counted when a user ID performs an action (e.g., login, post, view). Ex: A user logging in 5 times today is 1 DAU. Does not count users who only visit the landing page.",
    ),
    key(
        "Monthly Active Users (MAU)",
        "102k",
        15.0,
        "",
        "What: Unique users who engaged with the platform in the last 30 days. How: A rolling count of unique user IDs with activity. Ex: A user active on day 1 and day 28 is counted once. Does not count a user whose last visit was 31 days ago.",
    ),
    key(
        "Activation Rate",
        "35",
        2.0,
        "%",
        "What: Percentage of new users who perform a key first action. How: (New Users with Key Action / Total New Users) * 100. Ex: A user joins a group on their first day. Does not count a user who signs up but takes no further action.",
    ),
    key(
        "Cohort Retention – Day 7",
        "18",
        -1.5,
        "%",
        "What: Percentage of new users who return on the 7th day after signing up. How: (Users from a cohort active on Day 7 / Total users in cohort) * 100. Ex: Counts users who signed up last Monday and returned the following Monday. Does not count if they return on Day 6 or 8.",
    ),
];

static ENGAGEMENT: [SocietyMetric; 7] = [
    metric(
        "Number of Posts",
        "2,450",
        15.0,
        "",
        true,
        "What: Total number of posts published in the selected timeframe. How: Count of all posts created and published by users. Ex: A user creates a new post. Does not count draft posts or deleted posts.",
    ),
    metric(
        "Number of Post Likes",
        "18.2k",
        8.0,
        "",
        true,
        "What: Total number of likes received across all posts in the selected timeframe. How: Sum of all like interactions on published posts. Ex: A user likes a post. Does not count likes on deleted posts.",
    ),
    metric(
        "Number of Comments",
        "4,320",
        12.0,
        "",
        true,
        "What: Total number of comments received across all posts in the selected timeframe. How: Count of all comment interactions on published posts. Ex: A user comments on a post. Does not count comments on deleted posts.",
    ),
    metric(
        "Time Spent per Session",
        "12.5",
        -0.5,
        "m",
        false,
        "What: The average duration a user is actively engaged on the platform. How: Total active time of all users / Total number of sessions. Ex: A user actively browsing for 10 mins. Does not count time spent idle in a background browser tab.",
    ),
    metric(
        "Content Creation Rate",
        "11",
        1.0,
        "%",
        false,
        "What: Percentage of daily active users who create content. How: (Unique Content Creators / DAU) * 100. Ex: A user makes a post or a comment. Does not count a user who only likes or views content.",
    ),
    metric(
        "Post Engagement – Comments",
        "1.8",
        0.2,
        "avg",
        false,
        "What: The average number of comments per post. How: Total Comments / Total Posts. Ex: A direct reply to a post. Does not include post likes, shares, or other reactions.",
    ),
    metric(
        "Active Groups (7 Days)",
        "240",
        25.0,
        "",
        false,
        "What: Total groups with meaningful activity in the last 7 days. How: A count of groups with a new post, comment, or call. Ex: A group where a member posted yesterday. Does not count a group where members only viewed old content.",
    ),
];

static MONETIZATION: [SocietyMetric; 5] = [
    metric(
        "Products Sold (Digital)",
        "85",
        10.0,
        "",
        true,
        "What: Total volume of individual digital products sold. How: A count of completed purchase transactions for digital goods. Ex: A user buys a course and an e-book (2 products). Does not include subscriptions or free downloads.",
    ),
    metric(
        "Conversion Rate (Free → Paid)",
        "2.1",
        0.2,
        "%",
        true,
        "What: Percentage of free users who upgrade to a paid subscription. How: (Users who Upgraded / Total Free Users) * 100. Ex: A user on a free trial buys a monthly plan. Does not count existing paying users.",
    ),
    metric(
        "Paid Groups & Memberships",
        "150",
        22.0,
        "",
        true,
        "What: Total number of active, recurring subscriptions to groups or memberships. How: A sum of all currently active subscriptions. Ex: A user paying for a premium community. Does not include one-time product purchases.",
    ),
    metric(
        "Courses Published",
        "42",
        5.0,
        "",
        true,
        "What: The total number of new courses made available for sale. How: A count of courses set to a \"published\" or \"live\" state. Ex: A creator publishes a new 10-lesson course. Does not count a course that is still in a \"draft\" state.",
    ),
    metric(
        "Digital Products Created",
        "530",
        45.0,
        "",
        false,
        "What: Total new digital products created, published or not. How: A count of new product entries created in the backend. Ex: Includes a new course in \"draft\" and a published e-book. Measures creator intent.",
    ),
];

static COMMUNITY_HEALTH: [SocietyMetric; 2] = [
    metric(
        "Community Quality Score",
        "4.2",
        0.1,
        "/5",
        true,
        "What: A user-rated score for community health and safety. How: Calculated from the average rating from in-app surveys. Ex: Based on responses to \"How helpful is this community?\". Not an automated metric.",
    ),
    metric(
        "Moderation Actions",
        "112",
        -5.0,
        "",
        false,
        "What: Number of times moderators intervened (e.g., removing content). How: A direct count of actions logged by the moderation team. Ex: Removing a spam post. Does not count user reports that required no action.",
    ),
];

static PLATFORM_HEALTH: [SocietyMetric; 2] = [
    metric(
        "System Uptime %",
        "99.98",
        0.01,
        "%",
        true,
        "What: The percentage of time the platform was operational. How: (Total Time - Downtime) / Total Time * 100. Ex: Site down for 5 mins in a 24-hour period. Does not typically include planned maintenance.",
    ),
    metric(
        "Avg. Page Load",
        "250",
        -10.0,
        "ms",
        false,
        "What: Average time for a page to load and become interactive. How: Measured by performance monitoring tools across user sessions. Ex: Time from click to when you can scroll the new page. Lower is better.",
    ),
];

/// A group of society KPIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SocietySection {
    KeyMetrics,
    Engagement,
    Monetization,
    CommunityHealth,
    PlatformHealth,
}

impl SocietySection {
    /// Sections below the key-metrics banner, in display order.
    pub const DETAIL: [Self; 4] = [
        Self::Engagement,
        Self::Monetization,
        Self::CommunityHealth,
        Self::PlatformHealth,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::KeyMetrics => "key-metrics",
            Self::Engagement => "engagement",
            Self::Monetization => "monetization",
            Self::CommunityHealth => "community-health",
            Self::PlatformHealth => "platform-health",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::KeyMetrics => "Key Metrics",
            Self::Engagement => "Engagement & Content",
            Self::Monetization => "Marketplace & Monetization",
            Self::CommunityHealth => "Community Health",
            Self::PlatformHealth => "Platform Health",
        }
    }

    /// Icon name used by the front end.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::KeyMetrics => "star",
            Self::Engagement => "message-square",
            Self::Monetization => "shopping-cart",
            Self::CommunityHealth => "shield",
            Self::PlatformHealth => "server",
        }
    }

    #[must_use]
    pub fn metrics(self) -> &'static [SocietyMetric] {
        match self {
            Self::KeyMetrics => &KEY_METRICS,
            Self::Engagement => &ENGAGEMENT,
            Self::Monetization => &MONETIZATION,
            Self::CommunityHealth => &COMMUNITY_HEALTH,
            Self::PlatformHealth => &PLATFORM_HEALTH,
        }
    }
}

/// Category filter on the society dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SocietyFilter {
    #[default]
    All,
    Engagement,
    Monetization,
    CommunityHealth,
    PlatformHealth,
}

impl SocietyFilter {
    pub const ALL: [Self; 5] = [
        Self::All,
        Self::Engagement,
        Self::Monetization,
        Self::CommunityHealth,
        Self::PlatformHealth,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Engagement => "engagement",
            Self::Monetization => "monetization",
            Self::CommunityHealth => "community-health",
            Self::PlatformHealth => "platform-health",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Engagement => "Engagement",
            Self::Monetization => "Monetization",
            Self::CommunityHealth => "Community Health",
            Self::PlatformHealth => "Platform Health",
        }
    }

    /// Detail sections visible under this filter. Key metrics are always shown.
    #[must_use]
    pub fn sections(self) -> Vec<SocietySection> {
        match self {
            Self::All => SocietySection::DETAIL.to_vec(),
            Self::Engagement => vec![SocietySection::Engagement],
            Self::Monetization => vec![SocietySection::Monetization],
            Self::CommunityHealth => vec![SocietySection::CommunityHealth],
            Self::PlatformHealth => vec![SocietySection::PlatformHealth],
        }
    }
}

impl std::str::FromStr for SocietyFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.id() == s)
            .ok_or_else(|| ParseError::SocietyFilter(s.to_owned()))
    }
}

/// Reporting window on the society dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SocietyTimeframe {
    #[default]
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "qtd")]
    QuarterToDate,
    #[serde(rename = "ytd")]
    YearToDate,
}

impl SocietyTimeframe {
    pub const ALL: [Self; 4] = [
        Self::Last30Days,
        Self::Last7Days,
        Self::QuarterToDate,
        Self::YearToDate,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Last30Days => "30d",
            Self::Last7Days => "7d",
            Self::QuarterToDate => "qtd",
            Self::YearToDate => "ytd",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Last30Days => "Last 30 Days",
            Self::Last7Days => "Last 7 Days",
            Self::QuarterToDate => "Quarter-to-Date",
            Self::YearToDate => "Year-to-Date",
        }
    }
}

impl std::str::FromStr for SocietyTimeframe {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|timeframe| timeframe.id() == s)
            .ok_or_else(|| ParseError::SocietyTimeframe(s.to_owned()))
    }
}
