//! Client factory port
//!
//! Maps a provider profile to a transit client bound to that provider's
//! endpoint and product catalog.

use std::sync::Arc;

use domain::Profile;
#[cfg(test)]
use mockall::automock;

use super::TransitPort;
use crate::error::ApplicationError;

/// Port for building profile-bound transit clients
#[cfg_attr(test, automock)]
pub trait ClientFactory: Send + Sync {
    /// Build a client for the given profile
    ///
    /// Returns [`ApplicationError::UnsupportedProfile`] when no endpoint is
    /// known for the profile.
    fn create(&self, profile: Profile) -> Result<Arc<dyn TransitPort>, ApplicationError>;
}
