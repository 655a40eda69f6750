//! The table of known bookmakers.
//!
//! Each provider is one [`ProviderProfile`] row: name, numeric id, the odds
//! multiplier used for substitute data, and a function declaring the
//! provider's settings overrides. Adding a provider means adding a row.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::config::ConfigSource;
use crate::settings::{decimal_value, SettingsMap, MAX_ODDS, MIN_ODDS};

/// Static description of one bookmaker.
#[derive(Clone, Copy)]
pub struct ProviderProfile {
    /// Lower-case name, also the registry key.
    pub name: &'static str,

    /// Numeric identifier.
    pub id: u32,

    /// Substitute-data odds multiplier, in hundredths (105 = x1.05).
    pub multiplier_hundredths: i64,

    /// Reads this provider's settings overrides from configuration.
    pub overrides: fn(&dyn ConfigSource) -> SettingsMap,
}

impl ProviderProfile {
    pub fn odds_multiplier(&self) -> Decimal {
        Decimal::new(self.multiplier_hundredths, 2)
    }

    /// Evaluate the provider's overrides against `source`.
    pub fn settings_overrides(&self, source: &dyn ConfigSource) -> SettingsMap {
        (self.overrides)(source)
    }
}

impl std::fmt::Debug for ProviderProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderProfile")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("odds_multiplier", &self.odds_multiplier())
            .finish()
    }
}

pub const BET365: ProviderProfile = ProviderProfile {
    name: "bet365",
    id: 1,
    multiplier_hundredths: 100,
    overrides: bet365_overrides,
};

pub const PINNACLE: ProviderProfile = ProviderProfile {
    name: "pinnacle",
    id: 2,
    multiplier_hundredths: 105,
    overrides: pinnacle_overrides,
};

pub const BETFAIR: ProviderProfile = ProviderProfile {
    name: "betfair",
    id: 3,
    multiplier_hundredths: 102,
    overrides: betfair_overrides,
};

pub const SUPERODDS: ProviderProfile = ProviderProfile {
    name: "superodds",
    id: 4,
    multiplier_hundredths: 98,
    overrides: superodds_overrides,
};

/// Every provider the registry builds by default, in registration order.
pub const KNOWN_PROVIDERS: &[ProviderProfile] = &[BET365, PINNACLE, BETFAIR, SUPERODDS];

fn bet365_overrides(source: &dyn ConfigSource) -> SettingsMap {
    Overrides::new(source)
        .odds_range("BET365_MIN_ODDS", "BET365_MAX_ODDS", 1000)
        .flag("filter_inplay", "BET365_FILTER_INPLAY", true)
        .build()
}

fn pinnacle_overrides(source: &dyn ConfigSource) -> SettingsMap {
    Overrides::new(source)
        .odds_range("PINNACLE_MIN_ODDS", "PINNACLE_MAX_ODDS", 2000)
        .flag("asian_handicap", "PINNACLE_ASIAN_HANDICAP", true)
        .list("market_types", "PINNACLE_MARKET_TYPES", "1_1,1_2,1_3")
        .build()
}

fn betfair_overrides(source: &dyn ConfigSource) -> SettingsMap {
    Overrides::new(source)
        .odds_range("BETFAIR_MIN_ODDS", "BETFAIR_MAX_ODDS", 1000)
        .flag("exchange_mode", "BETFAIR_EXCHANGE_MODE", true)
        .number("commission_rate", "BETFAIR_COMMISSION", 0.05)
        .build()
}

fn superodds_overrides(source: &dyn ConfigSource) -> SettingsMap {
    Overrides::new(source)
        .odds_range("SUPERODDS_MIN_ODDS", "SUPERODDS_MAX_ODDS", 500)
        .flag("bonus_markets", "SUPERODDS_BONUS_MARKETS", true)
        .build()
}

/// Small builder turning configuration keys into an overrides map.
struct Overrides<'a> {
    source: &'a dyn ConfigSource,
    map: SettingsMap,
}

impl<'a> Overrides<'a> {
    fn new(source: &'a dyn ConfigSource) -> Self {
        Self {
            source,
            map: SettingsMap::new(),
        }
    }

    fn odds_range(mut self, min_key: &str, max_key: &str, default_max: i64) -> Self {
        let min = self.source.get_parsed(min_key, Decimal::new(101, 2));
        let max = self.source.get_parsed(max_key, Decimal::from(default_max));
        self.map.insert(MIN_ODDS.into(), decimal_value(min));
        self.map.insert(MAX_ODDS.into(), decimal_value(max));
        self
    }

    fn flag(mut self, name: &str, key: &str, default: bool) -> Self {
        self.map
            .insert(name.into(), Value::Bool(self.source.get_bool(key, default)));
        self
    }

    fn number(mut self, name: &str, key: &str, default: f64) -> Self {
        let value = self.source.get_parsed(key, default);
        self.map.insert(name.into(), Value::from(value));
        self
    }

    fn list(mut self, name: &str, key: &str, default: &str) -> Self {
        let items = self.source.get_list(key, default);
        self.map.insert(
            name.into(),
            Value::Array(items.into_iter().map(Value::String).collect()),
        );
        self
    }

    fn build(self) -> SettingsMap {
        self.map
    }
}
