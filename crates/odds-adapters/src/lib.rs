//! Surebet Odds Adapters Crate
//!
//! This crate normalizes odds data from multiple bookmakers into one
//! canonical schema so downstream consumers (surebet detection, price
//! comparison) never need provider-specific logic.
//!
//! # Overview
//!
//! The adapters crate supports:
//! - One parameterized adapter per bookmaker, driven by a provider table
//! - Shallow settings merge (global defaults + provider overrides)
//! - Provider-specific sport identifier resolution with caching
//! - Substitute (synthetic) data when no live integration is configured
//! - Fail-soft upstream access: provider outages degrade to empty results
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |     Caller       | --> | AdapterRegistry  |  (lookup by provider name)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | ProviderAdapter  |  (substitute or live mode)
//!                          +------------------+
//!                            |             |
//!                 substitute |             | live
//!                            v             v
//!              +-------------------+  +------------------+
//!              |SubstituteGenerator|  | SportIdResolver  |  (cached taxonomy lookup)
//!              +-------------------+  +------------------+
//!                            |             |
//!                            |             v
//!                            |    +------------------+
//!                            |    |  UpstreamClient  |  (external collaborator)
//!                            |    +------------------+
//!                            |             |
//!                            |             v
//!                            |    +------------------+
//!                            |    | CanonicalMapper  |
//!                            |    +------------------+
//!                            v             v
//!                          +------------------+
//!                          |  OddsValidator   |  (odds >= 1.0, min/max range when live)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  CanonicalEvent  |
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`CanonicalEvent`] - Provider-agnostic event with markets and selections
//! - [`ProviderSettings`] - Effective per-provider configuration
//! - [`OddsAdapter`] - The interface every provider adapter satisfies
//! - [`ProviderAdapter`] - The single parameterized adapter implementation
//! - [`AdapterRegistry`] - One adapter per known provider, keyed by name
//!
//! # Type Aliases
//!
//! - [`ProviderName`] - Provider identifier (e.g., "bet365", "pinnacle")
//! - [`SportId`] - Provider-specific sport identifier

pub mod config;
pub mod errors;
pub mod generator;
pub mod mapper;
pub mod models;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod settings;

// Re-export all public types from models
pub use models::{
    market_types, CanonicalEvent, CanonicalMarket, CanonicalSelection, EventStatus, ProviderName,
    SportEntry, SportId,
};

pub use config::{ConfigSource, EnvConfigSource, MapConfigSource};
pub use errors::{PayloadError, UpstreamError};
pub use generator::SubstituteGenerator;
pub use mapper::{CanonicalMapper, OddsValidator};
pub use provider::{
    AdapterMode, NoopUpstreamClient, OddsAdapter, ProviderAdapter, ProviderProfile, RateLimiter,
    UpstreamClient, KNOWN_PROVIDERS,
};
pub use registry::AdapterRegistry;
pub use resolver::{SportIdResolver, FALLBACK_SPORT_ID};
pub use settings::{effective_settings, BaseSettings, ProviderSettings, SettingsMap};
