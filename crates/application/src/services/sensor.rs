//! Polling transit sensor
//!
//! One sensor per config entry. Each poll queries the provider through the
//! injected [`TransitPort`], turns the raw results into trip candidates and
//! publishes a complete [`SensorState`] snapshot.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use domain::{ConfigEntry, SensorState, TripCandidate};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::executor::offload;
use crate::ports::{DepartureQuery, JourneyQuery, TransitPort};

/// Icon shown for every transit sensor
pub const SENSOR_ICON: &str = "mdi:train";
/// Device class of the published value
pub const SENSOR_DEVICE_CLASS: &str = "timestamp";

const DEFAULT_SCAN_INTERVAL_SECS: u64 = 30;
const DEFAULT_JOURNEY_RESULTS: u8 = 3;
const DEFAULT_DEPARTURE_RESULTS: u8 = 10;

/// Polling behaviour shared by all sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingSettings {
    /// Time between two polls (default: 30 s)
    pub scan_interval: Duration,
    /// Journeys requested per poll (default: 3)
    pub journey_results: u8,
    /// Departures requested per poll (default: 10)
    pub departure_results: u8,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            scan_interval: Duration::from_secs(DEFAULT_SCAN_INTERVAL_SECS),
            journey_results: DEFAULT_JOURNEY_RESULTS,
            departure_results: DEFAULT_DEPARTURE_RESULTS,
        }
    }
}

/// Static metadata of a sensor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorDescription {
    /// Display name (the entry title)
    pub name: String,
    /// Stable unique id (the entry id)
    pub unique_id: String,
    /// Icon identifier
    pub icon: &'static str,
    /// Device class of the value
    pub device_class: &'static str,
    /// Data attribution
    pub attribution: String,
}

/// A polling sensor for one config entry
pub struct TransitSensor {
    entry: ConfigEntry,
    client: Arc<dyn TransitPort>,
    settings: PollingSettings,
    state: ArcSwap<SensorState>,
    poll_lock: Mutex<()>,
}

impl fmt::Debug for TransitSensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitSensor")
            .field("entry_id", &self.entry.entry_id)
            .field("title", &self.entry.title)
            .field("available", &self.state.load().available)
            .finish_non_exhaustive()
    }
}

impl TransitSensor {
    /// Create a sensor; it stays unavailable until the first poll completes
    #[must_use]
    pub fn new(
        entry: ConfigEntry,
        client: Arc<dyn TransitPort>,
        settings: PollingSettings,
    ) -> Self {
        Self {
            entry,
            client,
            settings,
            state: ArcSwap::from_pointee(SensorState::unavailable()),
            poll_lock: Mutex::new(()),
        }
    }

    /// The entry this sensor was built from
    #[must_use]
    pub const fn entry(&self) -> &ConfigEntry {
        &self.entry
    }

    /// Sensor metadata
    #[must_use]
    pub fn description(&self) -> SensorDescription {
        SensorDescription {
            name: self.entry.title.clone(),
            unique_id: self.entry.entry_id.clone(),
            icon: SENSOR_ICON,
            device_class: SENSOR_DEVICE_CLASS,
            attribution: format!(
                "Provided by {} through HaFAS API",
                self.entry.data.profile.code()
            ),
        }
    }

    /// The last published state
    #[must_use]
    pub fn snapshot(&self) -> Arc<SensorState> {
        self.state.load_full()
    }

    /// Whether the last poll succeeded
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.state.load().available
    }

    /// Poll the provider once and publish the result
    ///
    /// Concurrent calls on the same sensor run one after the other. Failures
    /// never propagate: the sensor becomes unavailable until the next
    /// successful poll.
    #[instrument(skip(self), fields(entry_id = %self.entry.entry_id))]
    pub async fn update(&self) {
        let _guard = self.poll_lock.lock().await;
        let was_available = self.is_available();

        let next = match self.fetch(Utc::now()).await {
            Ok(candidates) => {
                let state = SensorState::from_candidates(&candidates);
                if !was_available {
                    info!(
                        title = %self.entry.title,
                        connections = state.connection_count(),
                        "Sensor available"
                    );
                }
                debug!(connections = state.connection_count(), "Poll complete");
                state
            },
            Err(e) => {
                if was_available {
                    warn!(title = %self.entry.title, error = %e, "Poll failed, sensor unavailable");
                } else {
                    debug!(title = %self.entry.title, error = %e, "Poll failed");
                }
                SensorState::unavailable()
            },
        };

        self.state.store(Arc::new(next));
    }

    /// Query the provider and transform the results, in provider order
    async fn fetch(&self, now: DateTime<Utc>) -> Result<Vec<TripCandidate>, ApplicationError> {
        let config = &self.entry.data;
        let products = self.client.catalog().filter(&config.products);
        let when = config.offset.shift(now)?;
        let client = Arc::clone(&self.client);

        if let Some(destination) = &config.destination {
            let query = JourneyQuery {
                origin: config.start.clone(),
                destination: destination.clone(),
                departure: when,
                max_transfers: config.only_direct.then_some(0),
                max_results: self.settings.journey_results,
                products,
            };
            let journeys = offload(async move { client.plan_journey(&query).await }).await?;

            Ok(journeys
                .iter()
                .filter_map(TripCandidate::from_journey)
                .collect())
        } else {
            let query = DepartureQuery {
                station: config.start.clone(),
                when,
                max_results: self.settings.departure_results,
                products,
            };
            let departures =
                offload(async move { client.departure_board(&query).await }).await?;

            Ok(departures
                .iter()
                .map(|d| TripCandidate::from_departure(d, &config.start))
                .collect())
        }
    }

    /// Spawn the polling loop
    ///
    /// Polls immediately, then once per scan interval; missed ticks are
    /// skipped. The loop ends when `shutdown` fires or its sender is dropped.
    /// A poll in progress at that moment is abandoned: its client call
    /// finishes on its own task and the result is discarded.
    pub fn spawn_polling(self: &Arc<Self>, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        let sensor = Arc::clone(self);
        let interval = self.settings.scan_interval;

        info!(
            entry_id = %self.entry.entry_id,
            interval_secs = interval.as_secs(),
            "Starting sensor polling task"
        );

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown.changed() => break,
                    () = async {
                        ticker.tick().await;
                        sensor.update().await;
                    } => {},
                }
            }

            debug!(entry_id = %sensor.entry.entry_id, "Sensor polling task stopped");
        })
    }
}
