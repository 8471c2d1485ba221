//! Domain entities

pub mod candidate;
pub mod entry_config;
pub mod sensor_state;
pub mod trip;

pub use candidate::{
    DepartureCandidate, JourneyCandidate, LegSummary, TripCandidate, TripSource, remark_text,
    stopover_text,
};
pub use entry_config::{ConfigEntry, EntryConfig};
pub use sensor_state::{ATTR_CONNECTIONS, ATTR_NEXT, ATTR_NEXT_ON, Attributes, SensorState};
pub use trip::{Departure, Journey, Leg, Remark, Stopover, TransportMode};
