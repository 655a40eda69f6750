//! Effective per-provider settings.
//!
//! Every adapter runs on one [`ProviderSettings`] value: the global
//! [`BaseSettings`] overridden key-by-key by the provider's own
//! [`SettingsMap`]. The merge is shallow. A provider key fully replaces the
//! base key of the same name, and provider-only keys (commission rate,
//! market-type allow-lists, ...) pass through untyped.

use std::time::Duration;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use tracing::warn;

use crate::config::{
    ConfigSource, GLOBAL_MAX_ODDS_KEY, GLOBAL_MIN_ODDS_KEY, MAX_RETRIES_KEY, RATE_LIMIT_KEY,
    TIMEOUT_KEY,
};

/// Untyped settings keyed by name.
pub type SettingsMap = serde_json::Map<String, Value>;

pub const TIMEOUT: &str = "timeout";
pub const MAX_RETRIES: &str = "max_retries";
pub const RATE_LIMIT: &str = "rate_limit";
pub const MIN_ODDS: &str = "min_odds";
pub const MAX_ODDS: &str = "max_odds";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_RATE_LIMIT_SECS: f64 = 1.0;

/// Settings every provider inherits.
#[derive(Clone, Debug, PartialEq)]
pub struct BaseSettings {
    /// Upstream request timeout.
    pub timeout: Duration,
    /// Retry budget for the upstream client.
    pub max_retries: u32,
    /// Minimum interval between two upstream requests.
    pub min_request_interval: Duration,
    /// Lowest odds accepted from any provider.
    pub min_odds: Decimal,
    /// Highest odds accepted from any provider.
    pub max_odds: Decimal,
}

impl Default for BaseSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            min_request_interval: Duration::from_secs_f64(DEFAULT_RATE_LIMIT_SECS),
            min_odds: default_min_odds(),
            max_odds: default_max_odds(),
        }
    }
}

impl BaseSettings {
    /// Read the global settings from a configuration source.
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        let rate_limit = source.get_parsed(RATE_LIMIT_KEY, DEFAULT_RATE_LIMIT_SECS);
        let min_request_interval = seconds(rate_limit).unwrap_or_else(|| {
            warn!(
                key = RATE_LIMIT_KEY,
                value = rate_limit,
                "Rate limit is not a representable interval, using default"
            );
            Duration::from_secs_f64(DEFAULT_RATE_LIMIT_SECS)
        });
        Self {
            timeout: Duration::from_secs(source.get_parsed(TIMEOUT_KEY, DEFAULT_TIMEOUT_SECS)),
            max_retries: source.get_parsed(MAX_RETRIES_KEY, DEFAULT_MAX_RETRIES),
            min_request_interval,
            min_odds: source.get_parsed(GLOBAL_MIN_ODDS_KEY, default_min_odds()),
            max_odds: source.get_parsed(GLOBAL_MAX_ODDS_KEY, default_max_odds()),
        }
    }

    /// Flatten into the untyped map the merge operates on.
    pub fn to_map(&self) -> SettingsMap {
        let mut map = SettingsMap::new();
        map.insert(TIMEOUT.into(), Value::from(self.timeout.as_secs()));
        map.insert(MAX_RETRIES.into(), Value::from(self.max_retries));
        map.insert(
            RATE_LIMIT.into(),
            float(self.min_request_interval.as_secs_f64()),
        );
        map.insert(MIN_ODDS.into(), decimal_value(self.min_odds));
        map.insert(MAX_ODDS.into(), decimal_value(self.max_odds));
        map
    }
}

/// Merge `overrides` over `base`. Pure, shallow, never fails.
pub fn effective_settings(base: &BaseSettings, overrides: &SettingsMap) -> ProviderSettings {
    let mut values = base.to_map();
    for (key, value) in overrides {
        values.insert(key.clone(), value.clone());
    }
    ProviderSettings { values }
}

/// The merged configuration of one provider.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProviderSettings {
    values: SettingsMap,
}

impl ProviderSettings {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &SettingsMap {
        &self.values
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => Some(s.eq_ignore_ascii_case("true")),
            _ => None,
        }
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.values.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn get_decimal(&self, key: &str) -> Option<Decimal> {
        match self.values.get(key)? {
            Value::Number(n) => n.as_f64().and_then(|f| Decimal::try_from(f).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// List of strings; a comma-separated string value is split.
    pub fn get_str_list(&self, key: &str) -> Option<Vec<String>> {
        match self.values.get(key)? {
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
            ),
            Value::String(s) => Some(
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.get_f64(TIMEOUT)
            .and_then(seconds)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn max_retries(&self) -> u32 {
        self.values
            .get(MAX_RETRIES)
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(DEFAULT_MAX_RETRIES)
    }

    pub fn min_request_interval(&self) -> Duration {
        self.get_f64(RATE_LIMIT)
            .and_then(seconds)
            .unwrap_or_else(|| Duration::from_secs_f64(DEFAULT_RATE_LIMIT_SECS))
    }

    pub fn min_odds(&self) -> Decimal {
        self.get_decimal(MIN_ODDS).unwrap_or_else(default_min_odds)
    }

    pub fn max_odds(&self) -> Decimal {
        self.get_decimal(MAX_ODDS).unwrap_or_else(default_max_odds)
    }
}

fn default_min_odds() -> Decimal {
    Decimal::new(101, 2)
}

fn default_max_odds() -> Decimal {
    Decimal::from(1000)
}

/// `None` for negative, NaN or infinite values and for anything past
/// `Duration::MAX`.
fn seconds(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs).ok()
}

fn float(value: f64) -> Value {
    Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}

/// Numeric JSON value for a decimal.
pub fn decimal_value(value: Decimal) -> Value {
    value.to_f64().map(float).unwrap_or(Value::Null)
}
