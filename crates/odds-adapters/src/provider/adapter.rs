//! The single parameterized bookmaker adapter.

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::config::{ConfigSource, MOCK_DATA_KEY};
use crate::errors::UpstreamError;
use crate::generator::SubstituteGenerator;
use crate::mapper::{CanonicalMapper, OddsValidator};
use crate::models::{CanonicalEvent, CanonicalMarket, EventStatus, ProviderName, SportId};
use crate::resolver::SportIdResolver;
use crate::settings::{effective_settings, BaseSettings, ProviderSettings};

use super::catalog::ProviderProfile;
use super::rate_limiter::RateLimiter;
use super::traits::{OddsAdapter, UpstreamClient, DEFAULT_SPORT};

/// Where an adapter's data comes from. Fixed at construction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdapterMode {
    /// Query the provider through its [`UpstreamClient`].
    Live,
    /// Serve generated data; upstream is never contacted.
    Substitute,
}

impl AdapterMode {
    /// `MOCK_BOOKMAKER_DATA` (default `true`) selects substitute mode.
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        if source.get_bool(MOCK_DATA_KEY, true) {
            AdapterMode::Substitute
        } else {
            AdapterMode::Live
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdapterMode::Live => "live",
            AdapterMode::Substitute => "substitute",
        }
    }
}

/// Adapter for one bookmaker, configured by a [`ProviderProfile`].
///
/// In substitute mode every operation is answered by the
/// [`SubstituteGenerator`]. In live mode the adapter resolves the sport id,
/// waits for its rate limiter, calls upstream under the configured timeout
/// and maps the payload. Live results are checked against the provider's
/// odds range; generated results only against the `odds >= 1.0` floor.
pub struct ProviderAdapter {
    name: ProviderName,
    id: u32,
    mode: AdapterMode,
    settings: ProviderSettings,
    client: Arc<dyn UpstreamClient>,
    resolver: SportIdResolver,
    generator: SubstituteGenerator,
    mapper: CanonicalMapper,
    validator: OddsValidator,
    substitute_validator: OddsValidator,
    rate_limiter: RateLimiter,
}

impl ProviderAdapter {
    pub fn new(
        profile: &ProviderProfile,
        settings: ProviderSettings,
        client: Arc<dyn UpstreamClient>,
        mode: AdapterMode,
    ) -> Self {
        let name: ProviderName = Cow::Borrowed(profile.name);

        info!(
            provider = profile.name,
            provider_id = profile.id,
            mode = mode.as_str(),
            "Initializing odds adapter"
        );
        if mode == AdapterMode::Substitute {
            warn!(
                provider = profile.name,
                "Adapter running with substitute data, upstream will not be queried"
            );
        }

        Self {
            id: profile.id,
            mode,
            client,
            resolver: SportIdResolver::new(name.clone()),
            generator: SubstituteGenerator::new(name.clone(), profile.odds_multiplier()),
            mapper: CanonicalMapper::new(name.clone()),
            validator: OddsValidator::from_settings(&settings),
            substitute_validator: OddsValidator::default(),
            rate_limiter: RateLimiter::new(profile.name, settings.min_request_interval()),
            settings,
            name,
        }
    }

    /// Build settings and mode from configuration.
    pub fn from_config(
        profile: &ProviderProfile,
        source: &dyn ConfigSource,
        client: Arc<dyn UpstreamClient>,
    ) -> Self {
        let base = BaseSettings::from_source(source);
        let settings = effective_settings(&base, &profile.settings_overrides(source));
        Self::new(profile, settings, client, AdapterMode::from_source(source))
    }

    pub fn sport_resolver(&self) -> &SportIdResolver {
        &self.resolver
    }

    pub fn generator(&self) -> &SubstituteGenerator {
        &self.generator
    }

    fn active_validator(&self) -> &OddsValidator {
        match self.mode {
            AdapterMode::Live => &self.validator,
            AdapterMode::Substitute => &self.substitute_validator,
        }
    }

    /// Sport id lookup, with the taxonomy query rate limited and bounded by
    /// the timeout like every other upstream call.
    async fn resolve_sport_id(&self, sport: &str) -> SportId {
        self.resolver
            .resolve_with(sport, || self.call_upstream(self.client.get_sport_taxonomy()))
            .await
    }

    async fn fetch_events(
        &self,
        sport: &str,
        status: EventStatus,
        limit: usize,
    ) -> Vec<CanonicalEvent> {
        let sport = if sport.trim().is_empty() { DEFAULT_SPORT } else { sport };

        let events = match self.mode {
            AdapterMode::Substitute => self.generator.generate(sport, status, limit),
            AdapterMode::Live => {
                let sport_id = self.resolve_sport_id(sport).await;
                let operation = match status {
                    EventStatus::Live => "get_live_odds",
                    EventStatus::Upcoming => "get_upcoming_odds",
                };

                match self.call_upstream(self.client.fetch_odds(&sport_id)).await {
                    Ok(payload) => self.mapper.to_canonical(&payload, status, limit),
                    Err(e) => {
                        self.report_failure(operation, &sport_id, None, &e);
                        Vec::new()
                    }
                }
            }
        };

        let events = self.active_validator().validate_events(events);
        debug!(
            provider = %self.name,
            sport,
            status = status.as_str(),
            count = events.len(),
            "Fetched events"
        );
        events
    }

    /// Rate-limited upstream call under the configured timeout.
    async fn call_upstream<T, F>(&self, request: F) -> Result<T, UpstreamError>
    where
        F: Future<Output = Result<T, UpstreamError>> + Send,
    {
        self.rate_limiter.acquire().await;

        let timeout = self.settings.timeout();
        match tokio::time::timeout(timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout {
                seconds: timeout.as_secs(),
            }),
        }
    }

    fn report_failure(
        &self,
        operation: &str,
        sport_id: &str,
        event_id: Option<&str>,
        e: &UpstreamError,
    ) {
        let status = e.status_code();
        match e {
            UpstreamError::NotFound { .. } => error!(
                provider = %self.name,
                sport_id,
                event_id,
                status,
                operation,
                error = %e,
                "Upstream resource not found, returning no data"
            ),
            _ => error!(
                provider = %self.name,
                sport_id,
                event_id,
                status,
                operation,
                error = %e,
                "Upstream request failed, returning no data"
            ),
        }
    }
}

impl std::fmt::Debug for ProviderAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderAdapter")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl OddsAdapter for ProviderAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn mode(&self) -> AdapterMode {
        self.mode
    }

    fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    async fn get_live_odds(&self, sport: &str, limit: usize) -> Vec<CanonicalEvent> {
        self.fetch_events(sport, EventStatus::Live, limit).await
    }

    async fn get_upcoming_odds(&self, sport: &str, limit: usize) -> Vec<CanonicalEvent> {
        self.fetch_events(sport, EventStatus::Upcoming, limit).await
    }

    async fn get_markets(&self, event_id: &str) -> Vec<CanonicalMarket> {
        let markets = match self.mode {
            AdapterMode::Substitute => self.generator.generate_markets(event_id),
            AdapterMode::Live => {
                // Event ids carry no sport, detail lookups go through the default sport.
                let sport_id = self.resolve_sport_id(DEFAULT_SPORT).await;

                match self
                    .call_upstream(self.client.fetch_event_detail(&sport_id, event_id))
                    .await
                {
                    Ok(payload) => self.mapper.markets_from_detail(&payload),
                    Err(e) => {
                        self.report_failure("get_markets", &sport_id, Some(event_id), &e);
                        Vec::new()
                    }
                }
            }
        };

        self.active_validator().validate_markets(markets)
    }
}
