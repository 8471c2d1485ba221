//! Display-ready trip candidates
//!
//! Turns the raw client types from [`crate::entities::trip`] into flat
//! records suitable for publishing as sensor attributes. Delays and
//! durations are rendered through [`crate::format::format_duration`].

use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::entities::trip::{Departure, Journey, Leg, Remark, Stopover};
use crate::format::serialize_formatted;
use crate::value_objects::Station;

/// Suffix appended to intermediate stops the leg skips
const CANCELED_STOP_SUFFIX: &str = " (canceled)";

/// A raw client result to be transformed
#[derive(Debug, Clone, Copy)]
pub enum TripSource<'a> {
    /// A journey from a journey-planning query
    Journey(&'a Journey),
    /// A departure-board entry, with the station that was queried
    Departure {
        /// The entry
        entry: &'a Departure,
        /// Queried station
        station: &'a Station,
    },
}

/// One ranked trip option as published to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TripCandidate {
    /// Full journey, origin to destination
    Journey(JourneyCandidate),
    /// Departure-board entry
    Departure(DepartureCandidate),
}

/// Display form of a [`Journey`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyCandidate {
    pub origin: String,
    pub departure: DateTime<FixedOffset>,
    #[serde(serialize_with = "serialize_formatted")]
    pub delay: Option<TimeDelta>,
    pub destination: String,
    pub arrival: Option<DateTime<FixedOffset>>,
    #[serde(serialize_with = "serialize_formatted")]
    pub delay_arrival: Option<TimeDelta>,
    pub transfers: usize,
    #[serde(serialize_with = "serialize_formatted")]
    pub duration: Option<TimeDelta>,
    pub canceled: bool,
    pub ontime: bool,
    pub products: String,
    pub legs: Vec<LegSummary>,
}

/// Display form of a [`Departure`]
///
/// Has no `transfers`, `duration` or `legs`; the destination is the
/// free-text direction of the entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartureCandidate {
    pub origin: String,
    pub departure: DateTime<FixedOffset>,
    #[serde(serialize_with = "serialize_formatted")]
    pub delay: Option<TimeDelta>,
    pub ontime: bool,
    pub destination: Option<String>,
    pub name: Option<String>,
    pub canceled: bool,
}

/// Display form of a [`Leg`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegSummary {
    pub origin: String,
    pub departure: DateTime<FixedOffset>,
    pub platform: Option<String>,
    #[serde(serialize_with = "serialize_formatted")]
    pub delay: Option<TimeDelta>,
    pub destination: String,
    pub arrival: Option<DateTime<FixedOffset>>,
    pub platform_arrival: Option<String>,
    #[serde(serialize_with = "serialize_formatted")]
    pub delay_arrival: Option<TimeDelta>,
    pub mode: String,
    pub name: Option<String>,
    pub canceled: bool,
    pub distance: Option<u32>,
    pub remarks: Vec<String>,
    pub stopovers: Vec<String>,
}

impl From<&Leg> for LegSummary {
    fn from(leg: &Leg) -> Self {
        Self {
            origin: leg.origin.name.clone(),
            departure: leg.departure,
            platform: leg.departure_platform.clone(),
            delay: leg.departure_delay,
            destination: leg.destination.name.clone(),
            arrival: leg.arrival,
            platform_arrival: leg.arrival_platform.clone(),
            delay_arrival: leg.arrival_delay,
            mode: leg.mode.to_string(),
            name: leg.name.clone(),
            canceled: leg.cancelled,
            distance: leg.distance,
            remarks: leg.remarks.iter().map(remark_text).collect(),
            stopovers: leg.stopovers.iter().map(stopover_text).collect(),
        }
    }
}

/// Text of a remark
#[must_use]
pub fn remark_text(remark: &Remark) -> String {
    remark.text.clone()
}

/// Stop name of a stopover, marked when the stop is skipped
#[must_use]
pub fn stopover_text(stopover: &Stopover) -> String {
    if stopover.cancelled {
        format!("{}{CANCELED_STOP_SUFFIX}", stopover.stop.name)
    } else {
        stopover.stop.name.clone()
    }
}

fn is_on_time(delay: Option<TimeDelta>) -> bool {
    delay.is_none_or(|d| d.is_zero())
}

impl TripCandidate {
    /// Transform a raw client result
    ///
    /// Returns `None` for a journey without legs; such journeys never
    /// become candidates.
    #[must_use]
    pub fn from_source(source: TripSource<'_>) -> Option<Self> {
        match source {
            TripSource::Journey(journey) => Self::from_journey(journey),
            TripSource::Departure { entry, station } => {
                Some(Self::from_departure(entry, station))
            },
        }
    }

    /// Transform a journey; `None` if it has no legs
    #[must_use]
    pub fn from_journey(journey: &Journey) -> Option<Self> {
        let first = journey.legs.first()?;
        let last = journey.legs.last()?;

        let mut products: Vec<&str> = Vec::new();
        for name in journey.legs.iter().filter_map(|l| l.name.as_deref()) {
            if !name.is_empty() && !products.contains(&name) {
                products.push(name);
            }
        }

        Some(Self::Journey(JourneyCandidate {
            origin: first.origin.name.clone(),
            departure: first.departure,
            delay: first.departure_delay,
            destination: last.destination.name.clone(),
            arrival: last.arrival,
            delay_arrival: last.arrival_delay,
            transfers: journey.legs.len() - 1,
            duration: journey.duration(),
            canceled: journey.legs.iter().any(|l| l.cancelled),
            ontime: is_on_time(first.departure_delay),
            products: products.join(", "),
            legs: journey.legs.iter().map(LegSummary::from).collect(),
        }))
    }

    /// Transform a departure-board entry queried at `station`
    #[must_use]
    pub fn from_departure(entry: &Departure, station: &Station) -> Self {
        Self::Departure(DepartureCandidate {
            origin: station.name.clone(),
            departure: entry.when,
            delay: entry.delay,
            ontime: is_on_time(entry.delay),
            destination: entry.direction.clone(),
            name: entry.name.clone(),
            canceled: entry.cancelled,
        })
    }

    /// Whether the trip is cancelled
    #[must_use]
    pub const fn canceled(&self) -> bool {
        match self {
            Self::Journey(j) => j.canceled,
            Self::Departure(d) => d.canceled,
        }
    }

    /// Planned departure
    #[must_use]
    pub const fn departure(&self) -> DateTime<FixedOffset> {
        match self {
            Self::Journey(j) => j.departure,
            Self::Departure(d) => d.departure,
        }
    }

    /// Departure delay, zero when unknown
    #[must_use]
    pub fn delay(&self) -> TimeDelta {
        match self {
            Self::Journey(j) => j.delay,
            Self::Departure(d) => d.delay,
        }
        .unwrap_or_else(TimeDelta::zero)
    }

    /// Planned departure shifted by the delay; `None` if not representable
    #[must_use]
    pub fn expected_departure(&self) -> Option<DateTime<FixedOffset>> {
        self.departure().checked_add_signed(self.delay())
    }

    /// Flat attribute map of this candidate, without the leg breakdown
    #[must_use]
    pub fn attributes(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(mut map)) => {
                map.remove("legs");
                map
            },
            _ => Map::new(),
        }
    }
}
