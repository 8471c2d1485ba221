//! Public transit service port
//!
//! Defines the interface a sensor and the setup wizard use to talk to a
//! provider. Adapters in the infrastructure layer implement this port on top
//! of a HAFAS client bound to one profile.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Departure, Journey, ProductCatalog, ProductFilter, Station};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// A journey search between two resolved stations
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyQuery {
    /// Origin station
    pub origin: Station,
    /// Destination station
    pub destination: Station,
    /// Earliest departure
    pub departure: DateTime<Utc>,
    /// Maximum number of transfers (`None` = unlimited)
    pub max_transfers: Option<u8>,
    /// Maximum number of journeys
    pub max_results: u8,
    /// Enabled products
    pub products: ProductFilter,
}

/// A departure-board query at one station
#[derive(Debug, Clone, PartialEq)]
pub struct DepartureQuery {
    /// Station to read departures for
    pub station: Station,
    /// Earliest departure
    pub when: DateTime<Utc>,
    /// Maximum number of departures
    pub max_results: u8,
    /// Enabled products
    pub products: ProductFilter,
}

/// Port for public transit operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransitPort: Send + Sync {
    /// Products offered by the bound provider
    fn catalog(&self) -> ProductCatalog;

    /// Resolve a free-text station name into candidate stations
    ///
    /// An empty result means nothing matched.
    async fn search_stations(&self, text: &str) -> Result<Vec<Station>, ApplicationError>;

    /// Plan journeys, in provider order
    async fn plan_journey(&self, query: &JourneyQuery) -> Result<Vec<Journey>, ApplicationError>;

    /// Read a departure board, in provider order
    async fn departure_board(
        &self,
        query: &DepartureQuery,
    ) -> Result<Vec<Departure>, ApplicationError>;
}
