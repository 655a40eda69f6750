//! Provider trait definitions.
//!
//! This module defines the two seams of the crate:
//! - [`UpstreamClient`]: what an adapter needs from a provider's API client
//! - [`OddsAdapter`]: what every provider adapter exposes to callers

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::UpstreamError;
use crate::models::{CanonicalEvent, CanonicalMarket, SportEntry};
use crate::settings::ProviderSettings;

use super::AdapterMode;

/// Sport requested when the caller passes an empty sport name.
pub const DEFAULT_SPORT: &str = "soccer";

/// Event limit callers conventionally use.
pub const DEFAULT_LIMIT: usize = 50;

/// Client for one provider's upstream API.
///
/// Implementations own transport concerns: HTTP, authentication, retries
/// (bounded by the settings' `max_retries`) and wire decoding into
/// [`serde_json::Value`]. A client that exhausts its retries reports
/// [`UpstreamError::RetriesExhausted`].
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use surebet_odds_adapters::{SportEntry, UpstreamClient, UpstreamError};
///
/// struct MyClient {
///     http: reqwest::Client,
/// }
///
/// #[async_trait]
/// impl UpstreamClient for MyClient {
///     async fn get_sport_taxonomy(&self) -> Result<Vec<SportEntry>, UpstreamError> {
///         // ... GET /sports
///     }
///
///     // ... implement fetch methods
/// }
/// ```
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// The provider's sport list as `{id, name}` rows.
    async fn get_sport_taxonomy(&self) -> Result<Vec<SportEntry>, UpstreamError>;

    /// Raw odds payload for a sport. `Value::Null` means "no data".
    async fn fetch_odds(&self, sport_id: &str) -> Result<Value, UpstreamError>;

    /// Raw detail payload (markets) for one event.
    async fn fetch_event_detail(&self, sport_id: &str, event_id: &str)
        -> Result<Value, UpstreamError>;
}

/// Client for deployments without any live integration.
///
/// Returns an empty taxonomy and `null` payloads, so a live-mode adapter
/// built on it always degrades to empty results.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopUpstreamClient;

#[async_trait]
impl UpstreamClient for NoopUpstreamClient {
    async fn get_sport_taxonomy(&self) -> Result<Vec<SportEntry>, UpstreamError> {
        Ok(Vec::new())
    }

    async fn fetch_odds(&self, _sport_id: &str) -> Result<Value, UpstreamError> {
        Ok(Value::Null)
    }

    async fn fetch_event_detail(
        &self,
        _sport_id: &str,
        _event_id: &str,
    ) -> Result<Value, UpstreamError> {
        Ok(Value::Null)
    }
}

/// Uniform interface of every bookmaker adapter.
///
/// Operations never fail: upstream problems are logged and turn into empty
/// results.
#[async_trait]
pub trait OddsAdapter: Send + Sync {
    /// Lower-case provider name, e.g. "bet365". Used as the registry key.
    fn name(&self) -> &str;

    /// Numeric provider identifier.
    fn id(&self) -> u32;

    /// Whether this adapter serves substitute data or calls upstream.
    fn mode(&self) -> AdapterMode;

    /// The effective (merged) settings of this provider.
    fn settings(&self) -> &ProviderSettings;

    /// In-play events for `sport`, at most `limit`.
    async fn get_live_odds(&self, sport: &str, limit: usize) -> Vec<CanonicalEvent>;

    /// Scheduled events for `sport`, at most `limit`.
    async fn get_upcoming_odds(&self, sport: &str, limit: usize) -> Vec<CanonicalEvent>;

    /// All markets offered on one event.
    async fn get_markets(&self, event_id: &str) -> Vec<CanonicalMarket>;

    fn is_substitute(&self) -> bool {
        self.mode() == AdapterMode::Substitute
    }
}
