//! HAFAS client error types

use thiserror::Error;

/// Failures of a request against a `hafas-rest-api` endpoint
#[derive(Debug, Error)]
pub enum HafasError {
    /// Endpoint settings are unusable
    #[error("Invalid HAFAS configuration: {0}")]
    Config(String),

    /// No response arrived
    #[error("HAFAS endpoint unreachable: {0}")]
    Unreachable(String),

    /// No response within the configured timeout
    #[error("HAFAS request timed out after {timeout_secs} s")]
    Timeout {
        /// Configured timeout
        timeout_secs: u64,
    },

    /// The endpoint answered 429
    #[error("Throttled by HAFAS endpoint, retry after {retry_after_secs:?} s")]
    Throttled {
        /// Value of the `Retry-After` header, when present
        retry_after_secs: Option<u64>,
    },

    /// Any other unsuccessful status
    #[error("HAFAS endpoint answered HTTP {status}")]
    Status {
        /// Response status code
        status: u16,
    },

    /// Body is not a usable `hafas-rest-api` document
    #[error("Malformed HAFAS response: {0}")]
    Malformed(String),

    /// Empty station query or station id
    #[error("Invalid location: {0}")]
    InvalidLocation(String),
}
