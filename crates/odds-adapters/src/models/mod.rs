//! Canonical odds models
//!
//! This module contains the provider-agnostic data types every adapter produces:
//! - `types` - Type aliases for common identifiers (ProviderName, SportId)
//! - `event` - Canonical event, market and selection shapes plus `EventStatus`
//! - `sport` - Sport taxonomy rows returned by upstream clients

mod event;
mod sport;
mod types;

pub use event::{market_types, CanonicalEvent, CanonicalMarket, CanonicalSelection, EventStatus};
pub use sport::SportEntry;
pub use types::{ProviderName, SportId};
