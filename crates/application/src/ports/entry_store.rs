//! Config entry storage port
//!
//! Persists the entries created by the setup wizard so they can be set up
//! again on the next start.

use async_trait::async_trait;
use domain::ConfigEntry;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for config entry persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConfigEntryStore: Send + Sync {
    /// Insert or replace an entry
    async fn save(&self, entry: &ConfigEntry) -> Result<(), ApplicationError>;

    /// Get an entry by id
    async fn load(&self, entry_id: &str) -> Result<Option<ConfigEntry>, ApplicationError>;

    /// All stored entries, in insertion order
    async fn load_all(&self) -> Result<Vec<ConfigEntry>, ApplicationError>;

    /// Delete an entry
    ///
    /// Returns true if the entry existed.
    async fn remove(&self, entry_id: &str) -> Result<bool, ApplicationError>;
}
