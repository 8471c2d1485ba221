//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Profile code is not one of the known providers
    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    /// Query offset exceeds the accepted range
    #[error("Time offset exceeds {max_days} days")]
    OffsetOutOfRange {
        /// Largest accepted offset
        max_days: u32,
    },
}
