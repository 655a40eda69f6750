use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Market type vocabulary consumers key on.
///
/// Types are additive only: never rename one. Upstream payloads may carry
/// other types, which pass through untouched.
pub mod market_types {
    /// Match result: home / draw / away
    pub const MATCH_RESULT: &str = "1X2";

    /// Total goals over/under a line
    pub const OVER_UNDER: &str = "OU";

    /// Double chance: 1X / 12 / X2
    pub const DOUBLE_CHANCE: &str = "DC";
}

/// Whether an event is in play or scheduled.
///
/// Supplied by the caller of the mapper, never derived from payload content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Live,
    Upcoming,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Live => "live",
            EventStatus::Upcoming => "upcoming",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single priced outcome within a market.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSelection {
    /// Outcome label (team name, "Draw", "Over 2.5", ...)
    pub name: String,

    /// Decimal odds, always >= 1.0 once past the validator
    pub odds: Decimal,
}

impl CanonicalSelection {
    pub fn new(name: impl Into<String>, odds: Decimal) -> Self {
        Self {
            name: name.into(),
            odds,
        }
    }
}

/// A betting market on an event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanonicalMarket {
    /// Market type key, see [`market_types`]
    #[serde(rename = "type")]
    pub market_type: String,

    /// Display name
    pub name: String,

    #[serde(default)]
    pub selections: Vec<CanonicalSelection>,
}

impl CanonicalMarket {
    pub fn new(
        market_type: impl Into<String>,
        name: impl Into<String>,
        selections: Vec<CanonicalSelection>,
    ) -> Self {
        Self {
            market_type: market_type.into(),
            name: name.into(),
            selections,
        }
    }
}

/// Provider-agnostic sporting event with its markets.
///
/// Identity is `(provider, id)`: `id` is provider-local and never globally unique.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    /// Provider-local event identifier
    pub id: String,

    /// Event display name, e.g. "Arsenal vs Chelsea"
    pub name: String,

    /// Sport name as requested or reported upstream
    pub sport: String,

    pub status: EventStatus,

    /// Kick-off time; `None` when the provider omitted or garbled it
    pub start_time: Option<DateTime<Utc>>,

    /// Name of the provider that priced this event
    pub provider: String,

    #[serde(default)]
    pub markets: Vec<CanonicalMarket>,
}

impl CanonicalEvent {
    /// Identity key of this event across providers.
    pub fn key(&self) -> (&str, &str) {
        (self.provider.as_str(), self.id.as_str())
    }

    /// Find a market by its type key.
    pub fn market(&self, market_type: &str) -> Option<&CanonicalMarket> {
        self.markets.iter().find(|m| m.market_type == market_type)
    }
}
