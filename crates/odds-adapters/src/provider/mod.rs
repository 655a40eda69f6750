//! Bookmaker adapters and their upstream seam.
//!
//! This module contains:
//! - The [`OddsAdapter`] trait every adapter implements
//! - The [`UpstreamClient`] trait adapters use to reach a provider's API
//! - The provider table ([`KNOWN_PROVIDERS`]) and the one adapter it drives
//! - Per-adapter request spacing ([`RateLimiter`])
//!
//! # Architecture
//!
//! Providers differ only in data: name, id, substitute-odds multiplier and
//! settings overrides. There is no per-provider adapter type; a
//! [`ProviderAdapter`] is built from a [`ProviderProfile`] row.

mod adapter;
mod catalog;
mod rate_limiter;
mod traits;

pub use adapter::{AdapterMode, ProviderAdapter};
pub use catalog::{ProviderProfile, BET365, BETFAIR, KNOWN_PROVIDERS, PINNACLE, SUPERODDS};
pub use rate_limiter::RateLimiter;
pub use traits::{NoopUpstreamClient, OddsAdapter, UpstreamClient, DEFAULT_LIMIT, DEFAULT_SPORT};
