//! Persisted configuration of one integration instance

use serde::{Deserialize, Serialize};

use crate::value_objects::{Profile, Station, TimeOffset};

/// Configuration collected by the setup wizard
///
/// Immutable once created. A missing destination turns the sensor into a
/// departure board for the origin station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryConfig {
    /// Provider profile
    pub profile: Profile,
    /// Origin station
    pub start: Station,
    /// Destination station (`None` = departure board)
    #[serde(default)]
    pub destination: Option<Station>,
    /// Shift applied to "now" for every query
    #[serde(default)]
    pub offset: TimeOffset,
    /// Only plan journeys without transfers
    #[serde(default)]
    pub only_direct: bool,
    /// Enabled product ids
    #[serde(default)]
    pub products: Vec<String>,
}

impl EntryConfig {
    /// Title shown for the entry and used as the sensor name
    #[must_use]
    pub fn title(&self) -> String {
        match &self.destination {
            Some(destination) => format!("{} to {}", self.start.name, destination.name),
            None => self.start.name.clone(),
        }
    }

    /// Whether this entry queries a departure board
    #[must_use]
    pub const fn is_departure_board(&self) -> bool {
        self.destination.is_none()
    }
}

/// A configuration as stored by the host, keyed by an opaque entry id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Opaque entry identifier
    pub entry_id: String,
    /// Display title
    pub title: String,
    /// Wizard data
    pub data: EntryConfig,
}
