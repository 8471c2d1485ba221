//! Station value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// A station as returned by a provider's location search
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Station {
    /// Provider-specific station identifier
    pub id: String,
    /// Human-readable station name
    pub name: String,
}

impl Station {
    /// Create a new station
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Deduplicate stations by name, keeping the first occurrence
///
/// Location searches frequently return the same stop under several ids
/// (e.g. separate bus and rail stop areas). Only the first, highest ranked
/// entry for each name is kept.
#[must_use]
pub fn dedup_by_name(stations: Vec<Station>) -> Vec<Station> {
    let mut seen = std::collections::HashSet::new();
    stations
        .into_iter()
        .filter(|s| seen.insert(s.name.clone()))
        .collect()
}
