//! Adapter registry module.
//!
//! Builds one adapter per known bookmaker and looks them up by name.

mod registry;

pub use registry::AdapterRegistry;
