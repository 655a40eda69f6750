//! Error types for the odds adapters crate.
//!
//! This module provides:
//! - [`UpstreamError`]: Failures reported by an upstream provider client
//! - [`PayloadError`]: Diagnostic-only reasons a raw payload produced no data
//!
//! Neither error ever reaches an adapter's caller. Adapters log them with
//! provider context and return an empty result instead.

use thiserror::Error;

/// Errors raised by an [`UpstreamClient`](crate::provider::UpstreamClient).
///
/// Every variant is handled the same way by the adapter (log, return empty).
/// The distinction exists so logs carry enough context to diagnose an outage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// The requested resource does not exist upstream (HTTP 404).
    #[error("Not found: {resource}")]
    NotFound {
        /// What was being looked up (sport id, event id, endpoint)
        resource: String,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("Upstream returned status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The request could not be delivered.
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout.
    #[error("Timed out after {seconds}s")]
    Timeout {
        /// The timeout that elapsed, in seconds
        seconds: u64,
    },

    /// The client gave up after its bounded retry budget.
    #[error("Retries exhausted after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Description of the final failure
        last_error: String,
    },

    /// The response body could not be decoded.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl UpstreamError {
    /// HTTP status code associated with this error, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use surebet_odds_adapters::errors::UpstreamError;
    ///
    /// let error = UpstreamError::NotFound { resource: "evt123".to_string() };
    /// assert_eq!(error.status_code(), Some(404));
    ///
    /// let error = UpstreamError::Network("connection reset".to_string());
    /// assert_eq!(error.status_code(), None);
    /// ```
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Status { status, .. } => Some(*status),
            Self::Network(_)
            | Self::Timeout { .. }
            | Self::RetriesExhausted { .. }
            | Self::Malformed(_) => None,
        }
    }
}

/// Reasons a raw provider payload yielded no canonical data.
///
/// Produced by the `try_*` functions of [`CanonicalMapper`](crate::mapper::CanonicalMapper).
/// Callers of the adapter never see it: it separates "provider sent nothing"
/// from "provider broke its contract" in the logs only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// The payload was absent (`null`).
    #[error("Empty payload")]
    Empty,

    /// The expected top-level container key is missing.
    #[error("Missing top-level container '{0}'")]
    MissingContainer(&'static str),

    /// The top-level container exists but is not a list.
    #[error("Container '{0}' is not an array")]
    NotAnArray(&'static str),
}
