//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// No client can be built for this profile
    #[error("Unsupported profile: {0}")]
    UnsupportedProfile(String),

    /// A station search matched nothing
    #[error("No station found for '{0}'")]
    NoStationFound(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// An entry could not be set up
    #[error("Setup failed: {0}")]
    SetupFailed(String),

    /// The entry is already running
    #[error("Entry already loaded: {0}")]
    AlreadyLoaded(String),

    /// The requested entry or flow step does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persistence error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
