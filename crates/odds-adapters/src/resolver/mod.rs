//! Sport identifier resolution for bookmaker adapters.
//!
//! Every provider names its sports with its own identifiers. The resolver
//! turns a human sport name ("soccer") into that identifier:
//!
//! ```text
//! resolve("soccer")
//!     │
//!     ├── cache hit ───────────────────────────────► cached id
//!     │
//!     └── miss ──► client.get_sport_taxonomy()
//!                     │
//!                     ├── substring match ──► cache + id
//!                     │
//!                     └── error / no match ──► warn once + FALLBACK_SPORT_ID
//! ```
//!
//! Resolution never fails.

mod sport_resolver;

pub use sport_resolver::{SportIdResolver, FALLBACK_SPORT_ID};
