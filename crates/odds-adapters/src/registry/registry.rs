//! Registry of bookmaker adapters.
//!
//! The registry owns one adapter per provider and hands out shared
//! references keyed by lower-case provider name. It is immutable once
//! built: adapters are registered at construction only.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{ConfigSource, EnvConfigSource};
use crate::provider::{
    AdapterMode, NoopUpstreamClient, OddsAdapter, ProviderAdapter, ProviderProfile,
    UpstreamClient, KNOWN_PROVIDERS,
};
use crate::settings::{effective_settings, BaseSettings, ProviderSettings};

/// Lookup of adapters by provider name.
pub struct AdapterRegistry {
    adapters: HashMap<String, Arc<dyn OddsAdapter>>,
    /// Provider names in registration order.
    order: Vec<String>,
}

impl AdapterRegistry {
    /// Register `adapters` under their lower-cased names.
    ///
    /// A later adapter with an already registered name replaces the earlier
    /// one but keeps its position.
    pub fn new(adapters: Vec<Arc<dyn OddsAdapter>>) -> Self {
        let mut registry = Self {
            adapters: HashMap::with_capacity(adapters.len()),
            order: Vec::with_capacity(adapters.len()),
        };

        for adapter in adapters {
            let key = adapter.name().to_lowercase();
            if registry.adapters.insert(key.clone(), adapter).is_some() {
                warn!(provider = %key, "Adapter registered twice, keeping the last one");
            } else {
                registry.order.push(key);
            }
        }

        info!(
            providers = ?registry.order,
            "Adapter registry initialized with {} adapters",
            registry.order.len()
        );
        registry
    }

    /// Build one [`ProviderAdapter`] per known provider.
    ///
    /// `client_factory` receives each provider's profile and effective
    /// settings (timeout, `max_retries`) and returns its upstream client.
    pub fn from_config<F>(source: &dyn ConfigSource, client_factory: F) -> Self
    where
        F: Fn(&ProviderProfile, &ProviderSettings) -> Arc<dyn UpstreamClient>,
    {
        Self::from_profiles(KNOWN_PROVIDERS, source, client_factory)
    }

    /// Build adapters for an explicit provider table.
    pub fn from_profiles<F>(
        profiles: &[ProviderProfile],
        source: &dyn ConfigSource,
        client_factory: F,
    ) -> Self
    where
        F: Fn(&ProviderProfile, &ProviderSettings) -> Arc<dyn UpstreamClient>,
    {
        let base = BaseSettings::from_source(source);
        let mode = AdapterMode::from_source(source);
        debug!(?base, mode = mode.as_str(), "Building adapters from configuration");

        let adapters = profiles
            .iter()
            .map(|profile| {
                let settings = effective_settings(&base, &profile.settings_overrides(source));
                let client = client_factory(profile, &settings);
                let adapter = ProviderAdapter::new(profile, settings, client, mode);
                Arc::new(adapter) as Arc<dyn OddsAdapter>
            })
            .collect();

        Self::new(adapters)
    }

    /// Environment-configured registry without live integrations.
    pub fn from_env() -> Self {
        let source = EnvConfigSource::new();
        Self::from_config(&source, |_, _| Arc::new(NoopUpstreamClient))
    }

    /// The adapter registered under `name`, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<Arc<dyn OddsAdapter>> {
        self.adapters.get(&name.to_lowercase()).cloned()
    }

    /// A copy of the name-to-adapter mapping. Mutating it leaves the
    /// registry untouched.
    pub fn all(&self) -> HashMap<String, Arc<dyn OddsAdapter>> {
        self.adapters.clone()
    }

    /// Provider names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Adapters in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn OddsAdapter>> {
        self.order.iter().filter_map(|name| self.adapters.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("providers", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfigSource;
    use crate::models::{CanonicalEvent, CanonicalMarket};
    use crate::provider::{BET365, PINNACLE};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Minimal adapter for registry tests.
    struct NamedAdapter {
        name: &'static str,
        id: u32,
        settings: ProviderSettings,
    }

    impl NamedAdapter {
        fn arc(name: &'static str, id: u32) -> Arc<dyn OddsAdapter> {
            Arc::new(Self {
                name,
                id,
                settings: ProviderSettings::default(),
            })
        }
    }

    #[async_trait]
    impl OddsAdapter for NamedAdapter {
        fn name(&self) -> &str {
            self.name
        }

        fn id(&self) -> u32 {
            self.id
        }

        fn mode(&self) -> AdapterMode {
            AdapterMode::Substitute
        }

        fn settings(&self) -> &ProviderSettings {
            &self.settings
        }

        async fn get_live_odds(&self, _sport: &str, _limit: usize) -> Vec<CanonicalEvent> {
            Vec::new()
        }

        async fn get_upcoming_odds(&self, _sport: &str, _limit: usize) -> Vec<CanonicalEvent> {
            Vec::new()
        }

        async fn get_markets(&self, _event_id: &str) -> Vec<CanonicalMarket> {
            Vec::new()
        }
    }

    #[test]
    fn test_default_providers() {
        let registry = AdapterRegistry::from_config(&MapConfigSource::new(), |_, _| {
            Arc::new(NoopUpstreamClient)
        });

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.names(), vec!["bet365", "pinnacle", "betfair", "superodds"]);
        assert_eq!(registry.get("pinnacle").map(|a| a.id()), Some(2));
        assert!(registry.iter().all(|a| a.is_substitute()));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = AdapterRegistry::new(vec![NamedAdapter::arc("bet365", 1)]);
        assert!(registry.get("BET365").is_some());
        assert!(registry.get("Bet365").is_some());
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_registration_normalizes_names() {
        let registry = AdapterRegistry::new(vec![NamedAdapter::arc("Pinnacle", 2)]);
        assert_eq!(registry.names(), vec!["pinnacle"]);
        assert!(registry.get("pinnacle").is_some());
    }

    #[test]
    fn test_all_returns_independent_copy() {
        let registry = AdapterRegistry::new(vec![
            NamedAdapter::arc("bet365", 1),
            NamedAdapter::arc("pinnacle", 2),
        ]);

        let mut all = registry.all();
        all.remove("bet365");
        all.insert("other".into(), NamedAdapter::arc("other", 9));

        assert_eq!(registry.len(), 2);
        assert!(registry.get("bet365").is_some());
        assert!(registry.get("other").is_none());
    }

    #[test]
    fn test_duplicate_name_replaces_in_place() {
        let registry = AdapterRegistry::new(vec![
            NamedAdapter::arc("bet365", 1),
            NamedAdapter::arc("pinnacle", 2),
            NamedAdapter::arc("BET365", 7),
        ]);

        assert_eq!(registry.names(), vec!["bet365", "pinnacle"]);
        assert_eq!(registry.get("bet365").map(|a| a.id()), Some(7));
    }

    #[test]
    fn test_empty_registry() {
        let registry = AdapterRegistry::new(Vec::new());
        assert!(registry.is_empty());
        assert!(registry.get("bet365").is_none());
        assert!(registry.all().is_empty());
    }

    #[test]
    fn test_factory_sees_effective_settings() {
        let calls = AtomicUsize::new(0);
        let source = MapConfigSource::new()
            .with("MOCK_BOOKMAKER_DATA", "false")
            .with("BOOKMAKER_MAX_RETRIES", "5")
            .with("PINNACLE_MAX_ODDS", "1500");

        let registry =
            AdapterRegistry::from_profiles(&[BET365, PINNACLE], &source, |profile, settings| {
                calls.fetch_add(1, Ordering::SeqCst);
                assert_eq!(settings.max_retries(), 5);
                if profile.name == "pinnacle" {
                    assert_eq!(settings.max_odds(), rust_decimal::Decimal::from(1500));
                }
                Arc::new(NoopUpstreamClient)
            });

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(registry.iter().all(|a| a.mode() == AdapterMode::Live));
    }
}
