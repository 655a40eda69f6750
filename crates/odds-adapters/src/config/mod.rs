//! Configuration sources for adapter construction.
//!
//! Adapters read their settings exactly once, at construction time, through a
//! [`ConfigSource`]. A missing key is never an error: every lookup carries a
//! documented default. A present but unparseable value also falls back to the
//! default, with a warning naming the key.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Once;

use tracing::warn;

/// Selects substitute mode when `true` (the default).
pub const MOCK_DATA_KEY: &str = "MOCK_BOOKMAKER_DATA";
/// Upstream request timeout, in seconds.
pub const TIMEOUT_KEY: &str = "BOOKMAKER_TIMEOUT";
/// Retry budget handed to upstream clients.
pub const MAX_RETRIES_KEY: &str = "BOOKMAKER_MAX_RETRIES";
/// Minimum interval between upstream requests, in seconds.
pub const RATE_LIMIT_KEY: &str = "BOOKMAKER_RATE_LIMIT";
/// Global lower bound for accepted odds.
pub const GLOBAL_MIN_ODDS_KEY: &str = "GLOBAL_MIN_ODDS";
/// Global upper bound for accepted odds.
pub const GLOBAL_MAX_ODDS_KEY: &str = "GLOBAL_MAX_ODDS";

/// Resolves named settings to raw string values.
pub trait ConfigSource: Send + Sync {
    /// Raw value for `key`, or `None` when unset.
    fn get(&self, key: &str) -> Option<String>;
}

impl dyn ConfigSource + '_ {
    /// Parse `key` as `T`, falling back to `default` when unset or invalid.
    pub fn get_parsed<T: FromStr>(&self, key: &str, default: T) -> T {
        parse_or_default(self.get(key), key, default)
    }

    /// Boolean flag: only a case-insensitive `"true"` enables it.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key)
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(default)
    }

    /// Comma-separated list, trimmed, empty entries removed.
    pub fn get_list(&self, key: &str, default: &str) -> Vec<String> {
        split_list(&self.get(key).unwrap_or_else(|| default.to_string()))
    }
}

fn parse_or_default<T: FromStr>(raw: Option<String>, key: &str, default: T) -> T {
    match raw {
        None => default,
        Some(value) => match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(key, value = %value, "Invalid configuration value, using default");
                default
            }
        },
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

static DOTENV: Once = Once::new();

/// Reads settings from the process environment.
///
/// A `.env` file in the working directory is loaded once per process, the
/// first time an `EnvConfigSource` is created. Variables already set in the
/// environment win over the file.
#[derive(Clone, Copy, Debug)]
pub struct EnvConfigSource;

impl EnvConfigSource {
    pub fn new() -> Self {
        DOTENV.call_once(|| {
            dotenvy::dotenv().ok();
        });
        Self
    }
}

impl Default for EnvConfigSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for EnvConfigSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory settings, mostly for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MapConfigSource {
    values: HashMap<String, String>,
}

impl MapConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl<K, V> FromIterator<(K, V)> for MapConfigSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for MapConfigSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
