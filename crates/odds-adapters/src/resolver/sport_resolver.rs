//! Cached sport-name to provider-sport-id resolution.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use tracing::{debug, warn};

use crate::errors::UpstreamError;
use crate::models::{ProviderName, SportEntry, SportId};
use crate::provider::UpstreamClient;

/// Identifier returned when the taxonomy cannot be used (soccer/default sport).
pub const FALLBACK_SPORT_ID: &str = "1";

/// Resolves sport names to one provider's sport identifiers.
///
/// Owned by a single adapter. Successful resolutions are cached for the life
/// of the resolver (no TTL: a provider's taxonomy is assumed stable). Misses
/// degrade to [`FALLBACK_SPORT_ID`] and are warned about once per sport name.
pub struct SportIdResolver {
    provider: ProviderName,
    cache: RwLock<HashMap<String, SportId>>,
    warned: Mutex<HashSet<String>>,
}

impl SportIdResolver {
    pub fn new(provider: ProviderName) -> Self {
        Self {
            provider,
            cache: RwLock::new(HashMap::new()),
            warned: Mutex::new(HashSet::new()),
        }
    }

    /// Resolve `sport_name` for this provider. Never fails.
    pub async fn resolve(&self, client: &dyn UpstreamClient, sport_name: &str) -> SportId {
        self.resolve_with(sport_name, || client.get_sport_taxonomy()).await
    }

    /// Like [`resolve`](Self::resolve), with the taxonomy query supplied by
    /// the caller. `query` only runs on a cache miss; its error (a timeout
    /// included) takes the fallback path.
    pub async fn resolve_with<F, Fut>(&self, sport_name: &str, query: F) -> SportId
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<SportEntry>, UpstreamError>>,
    {
        let key = cache_key(sport_name);

        if let Some(id) = self.cached(&key) {
            return id;
        }

        match query().await {
            Ok(taxonomy) => {
                if let Some(entry) = find_sport(&taxonomy, &key) {
                    let id: SportId = Arc::from(entry.id.as_str());
                    debug!(
                        provider = %self.provider,
                        sport = sport_name,
                        sport_id = %id,
                        "Resolved sport id from taxonomy"
                    );
                    self.write_cache().insert(key, id.clone());
                    return id;
                }
                self.warn_fallback(&key, sport_name, "no matching sport in taxonomy");
            }
            Err(e) => {
                debug!(
                    provider = %self.provider,
                    sport = sport_name,
                    error = %e,
                    "Sport taxonomy query failed"
                );
                self.warn_fallback(&key, sport_name, "sport taxonomy unavailable");
            }
        }

        Arc::from(FALLBACK_SPORT_ID)
    }

    /// Cached identifier for `sport_name`, if one was resolved before.
    pub fn cached(&self, sport_name: &str) -> Option<SportId> {
        self.read_cache().get(&cache_key(sport_name)).cloned()
    }

    /// Number of sport names with a cached identifier.
    pub fn cached_len(&self) -> usize {
        self.read_cache().len()
    }

    /// Whether a fallback warning was already emitted for `sport_name`.
    pub fn has_warned(&self, sport_name: &str) -> bool {
        self.lock_warned().contains(&cache_key(sport_name))
    }

    fn warn_fallback(&self, key: &str, sport_name: &str, reason: &str) {
        // insert() is false when this sport was already warned about
        if self.lock_warned().insert(key.to_string()) {
            warn!(
                provider = %self.provider,
                sport = sport_name,
                fallback_id = FALLBACK_SPORT_ID,
                "Could not resolve sport id ({}), using fallback",
                reason
            );
        }
    }

    fn read_cache(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, SportId>> {
        self.cache.read().unwrap_or_else(|poisoned| {
            warn!("Sport id cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_cache(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, SportId>> {
        self.cache.write().unwrap_or_else(|poisoned| {
            warn!("Sport id cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn lock_warned(&self) -> MutexGuard<'_, HashSet<String>> {
        self.warned.lock().unwrap_or_else(|poisoned| {
            warn!("Sport warning set lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

fn cache_key(sport_name: &str) -> String {
    sport_name.trim().to_lowercase()
}

/// First taxonomy entry whose name contains `needle` (already lower-cased).
fn find_sport<'a>(taxonomy: &'a [SportEntry], needle: &str) -> Option<&'a SportEntry> {
    if needle.is_empty() {
        return None;
    }
    taxonomy
        .iter()
        .find(|entry| entry.name.to_lowercase().contains(needle))
}
