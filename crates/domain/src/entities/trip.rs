//! Raw trip types as produced by a transit client
//!
//! These are the client's response objects: journeys made of legs, and
//! departure-board entries. They carry planned times plus separate delays;
//! the display-ready form lives in [`crate::entities::candidate`].

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeDelta};

use crate::value_objects::Station;

/// A planned trip from an origin to a destination
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    /// Ride segments in travel order
    pub legs: Vec<Leg>,
}

impl Journey {
    /// Total planned travel time, first departure to last arrival
    #[must_use]
    pub fn duration(&self) -> Option<TimeDelta> {
        let first = self.legs.first()?;
        let arrival = self.legs.last()?.arrival?;
        Some(arrival - first.departure)
    }
}

/// One uninterrupted ride segment of a journey
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Boarding stop
    pub origin: Station,
    /// Alighting stop
    pub destination: Station,
    /// Planned departure
    pub departure: DateTime<FixedOffset>,
    /// Departure delay (`None` = no realtime data)
    pub departure_delay: Option<TimeDelta>,
    /// Departure platform
    pub departure_platform: Option<String>,
    /// Planned arrival
    pub arrival: Option<DateTime<FixedOffset>>,
    /// Arrival delay
    pub arrival_delay: Option<TimeDelta>,
    /// Arrival platform
    pub arrival_platform: Option<String>,
    /// Means of transport
    pub mode: TransportMode,
    /// Line name (e.g. "RE 5"); absent for walking legs
    pub name: Option<String>,
    /// Whether this leg is cancelled
    pub cancelled: bool,
    /// Distance in meters, mostly for walking legs
    pub distance: Option<u32>,
    /// Free-text remarks
    pub remarks: Vec<Remark>,
    /// Intermediate stops
    pub stopovers: Vec<Stopover>,
}

/// A free-text remark attached to a leg or departure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remark {
    /// Remark text
    pub text: String,
}

/// An intermediate stop of a leg
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopover {
    /// The stop
    pub stop: Station,
    /// Whether the leg skips this stop
    pub cancelled: bool,
}

/// A single departure-board entry
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    /// Planned departure
    pub when: DateTime<FixedOffset>,
    /// Departure delay
    pub delay: Option<TimeDelta>,
    /// Free-text direction (no resolved station)
    pub direction: Option<String>,
    /// Line name
    pub name: Option<String>,
    /// Departure platform
    pub platform: Option<String>,
    /// Whether this departure is cancelled
    pub cancelled: bool,
}

/// Means of transport of a leg
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransportMode {
    /// Any rail vehicle
    Train,
    /// Bus
    Bus,
    /// Ferry / boat
    Watercraft,
    /// Taxi or on-demand service
    Taxi,
    /// Cable car / gondola
    Gondola,
    /// Walking transfer
    Walking,
    /// A mode this crate does not know, kept verbatim
    Other(String),
}

impl TransportMode {
    /// Map a provider mode string to a transport mode
    #[must_use]
    pub fn from_provider(mode: &str) -> Self {
        match mode.to_ascii_lowercase().as_str() {
            "train" => Self::Train,
            "bus" => Self::Bus,
            "watercraft" | "ferry" => Self::Watercraft,
            "taxi" => Self::Taxi,
            "gondola" => Self::Gondola,
            "walking" | "walk" => Self::Walking,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Train => write!(f, "train"),
            Self::Bus => write!(f, "bus"),
            Self::Watercraft => write!(f, "watercraft"),
            Self::Taxi => write!(f, "taxi"),
            Self::Gondola => write!(f, "gondola"),
            Self::Walking => write!(f, "walking"),
            Self::Other(mode) => write!(f, "{mode}"),
        }
    }
}
