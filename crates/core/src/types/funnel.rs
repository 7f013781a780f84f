//! Funnel identifiers and descriptors.
//!
//! A funnel is either one of the aggregate categories (all, subscription,
//! one-time, individual) or one of ten named acquisition flows. Named funnels
//! carry a fixed index that the funnel generator uses to skew its rates.

use serde::{Deserialize, Serialize};

use super::ParseError;

/// One of the ten named acquisition funnels, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndividualFunnel {
    LeadMagnet,
    Webinar,
    ProductLaunch,
    Tripwire,
    Vsl,
    Challenge,
    HighTicket,
    Ebook,
    FreeTrial,
    Membership,
}

impl IndividualFunnel {
    /// All named funnels, in catalog order.
    pub const ALL: [Self; 10] = [
        Self::LeadMagnet,
        Self::Webinar,
        Self::ProductLaunch,
        Self::Tripwire,
        Self::Vsl,
        Self::Challenge,
        Self::HighTicket,
        Self::Ebook,
        Self::FreeTrial,
        Self::Membership,
    ];

    /// Display name, which doubles as the wire identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LeadMagnet => "Lead Magnet Funnel",
            Self::Webinar => "Webinar Funnel",
            Self::ProductLaunch => "Product Launch Funnel",
            Self::Tripwire => "Tripwire Funnel",
            Self::Vsl => "VSL Funnel",
            Self::Challenge => "Challenge Funnel",
            Self::HighTicket => "High-Ticket Funnel",
            Self::Ebook => "Ebook Funnel",
            Self::FreeTrial => "Free Trial Funnel",
            Self::Membership => "Membership Funnel",
        }
    }

    /// Zero-based position in the catalog.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::LeadMagnet => 0,
            Self::Webinar => 1,
            Self::ProductLaunch => 2,
            Self::Tripwire => 3,
            Self::Vsl => 4,
            Self::Challenge => 5,
            Self::HighTicket => 6,
            Self::Ebook => 7,
            Self::FreeTrial => 8,
            Self::Membership => 9,
        }
    }

    /// Look up a named funnel by its display name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|funnel| funnel.name() == name)
    }
}

/// Funnel selector for a dashboard request.
///
/// Serialized as its identifier string (`all-funnels`, `Webinar Funnel`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Funnel {
    #[default]
    AllFunnels,
    SubscriptionFunnel,
    OneTimeFunnel,
    /// Aggregate over the named funnels.
    IndividualFunnels,
    Individual(IndividualFunnel),
    /// An identifier outside the catalog. Only produced by [`Funnel::from_identifier`].
    Other(String),
}

impl Funnel {
    /// Parse leniently: anything outside the catalog becomes [`Funnel::Other`].
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Self {
        identifier
            .parse()
            .unwrap_or_else(|_| Self::Other(identifier.to_owned()))
    }

    /// Wire identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::AllFunnels => "all-funnels",
            Self::SubscriptionFunnel => "subscription-funnel",
            Self::OneTimeFunnel => "one-time-funnel",
            Self::IndividualFunnels => "individual-funnels",
            Self::Individual(funnel) => funnel.name(),
            Self::Other(identifier) => identifier,
        }
    }

    /// Descriptors for every selectable funnel: the three categories followed
    /// by the named funnels.
    #[must_use]
    pub fn catalog() -> Vec<FunnelDescriptor> {
        let aggregates = [
            FunnelDescriptor {
                id: "all-funnels".to_owned(),
                name: "All Funnels".to_owned(),
                kind: FunnelKind::Aggregate,
                description: "Combined data from all funnels".to_owned(),
            },
            FunnelDescriptor {
                id: "subscription-funnel".to_owned(),
                name: "Subscription Funnel".to_owned(),
                kind: FunnelKind::Subscription,
                description: "Funnel optimized for subscription products".to_owned(),
            },
            FunnelDescriptor {
                id: "one-time-funnel".to_owned(),
                name: "One-Time Purchase Funnel".to_owned(),
                kind: FunnelKind::OneTime,
                description: "Funnel optimized for single purchases".to_owned(),
            },
        ];

        aggregates
            .into_iter()
            .chain(IndividualFunnel::ALL.into_iter().map(|funnel| FunnelDescriptor {
                id: funnel.name().to_owned(),
                name: funnel.name().to_owned(),
                kind: FunnelKind::Individual,
                description: format!("Individual funnel: {}", funnel.name()),
            }))
            .collect()
    }
}

impl std::fmt::Display for Funnel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Funnel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all-funnels" => Ok(Self::AllFunnels),
            "subscription-funnel" => Ok(Self::SubscriptionFunnel),
            "one-time-funnel" => Ok(Self::OneTimeFunnel),
            "individual-funnels" => Ok(Self::IndividualFunnels),
            _ => IndividualFunnel::from_name(s)
                .map(Self::Individual)
                .ok_or_else(|| ParseError::Funnel(s.to_owned())),
        }
    }
}

impl From<Funnel> for String {
    fn from(funnel: Funnel) -> Self {
        match funnel {
            Funnel::Other(identifier) => identifier,
            other => other.as_str().to_owned(),
        }
    }
}

impl TryFrom<String> for Funnel {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Category of a funnel descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FunnelKind {
    Aggregate,
    Subscription,
    OneTime,
    Individual,
}

/// Selectable funnel as listed by the funnels endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelDescriptor {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FunnelKind,
    pub description: String,
}
