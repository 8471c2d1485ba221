//! Sensor polling settings

use std::time::Duration;

use application::PollingSettings;
use serde::{Deserialize, Serialize};

/// How often and how much each sensor fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingAppConfig {
    /// Seconds between two polls of the same sensor
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,

    /// Journeys requested per poll when a destination is set
    #[serde(default = "default_journey_results")]
    pub journey_results: u8,

    /// Departures requested per poll for a departure board
    #[serde(default = "default_departure_results")]
    pub departure_results: u8,
}

const fn default_scan_interval_secs() -> u64 {
    30
}

const fn default_journey_results() -> u8 {
    3
}

const fn default_departure_results() -> u8 {
    10
}

impl Default for PollingAppConfig {
    fn default() -> Self {
        Self {
            scan_interval_secs: default_scan_interval_secs(),
            journey_results: default_journey_results(),
            departure_results: default_departure_results(),
        }
    }
}

impl From<&PollingAppConfig> for PollingSettings {
    fn from(config: &PollingAppConfig) -> Self {
        Self {
            scan_interval: Duration::from_secs(config.scan_interval_secs),
            journey_results: config.journey_results,
            departure_results: config.departure_results,
        }
    }
}
