//! Canonical mapping and boundary validation.
//!
//! This module contains:
//! - [`CanonicalMapper`]: raw provider payloads to canonical events/markets
//! - [`OddsValidator`]: drops selections whose odds are invalid or out of range

mod canonical;
mod validator;

pub use canonical::{CanonicalMapper, EVENTS_CONTAINER, MARKETS_CONTAINER};
pub use validator::{OddsRejection, OddsValidator};
