//! Published sensor state

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::entities::candidate::TripCandidate;

/// Attribute key holding the full candidate list
pub const ATTR_CONNECTIONS: &str = "connections";
/// Attribute key of the second running candidate's departure
pub const ATTR_NEXT: &str = "next";
/// Attribute key of the third running candidate's departure
pub const ATTR_NEXT_ON: &str = "next_on";

/// Key/value attribute bag published next to the sensor value
pub type Attributes = Map<String, Value>;

/// The state a sensor publishes after one poll
///
/// Always built as a whole and never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorState {
    /// Whether the last poll succeeded
    pub available: bool,
    /// Next departure including delay (`None` = nothing running)
    pub value: Option<DateTime<FixedOffset>>,
    /// Display attributes
    pub attributes: Attributes,
}

impl SensorState {
    /// State after a failed poll, and before the first one completes
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            available: false,
            value: None,
            attributes: Attributes::new(),
        }
    }

    /// Derive the published state from candidates in provider order
    ///
    /// The value comes from the first candidate that is not cancelled.
    /// `next` and `next_on` come from the second and third running
    /// candidates. `connections` always lists every candidate, including
    /// cancelled ones.
    #[must_use]
    pub fn from_candidates(candidates: &[TripCandidate]) -> Self {
        let connections = Value::Array(
            candidates
                .iter()
                .map(|c| serde_json::to_value(c).unwrap_or(Value::Null))
                .collect(),
        );

        // running trips with a representable expected departure
        let running: Vec<(&TripCandidate, DateTime<FixedOffset>)> = candidates
            .iter()
            .filter(|c| !c.canceled())
            .filter_map(|c| c.expected_departure().map(|at| (c, at)))
            .collect();

        let Some(&(first, first_at)) = running.first() else {
            let mut attributes = Attributes::new();
            attributes.insert(ATTR_CONNECTIONS.to_string(), connections);
            return Self {
                available: true,
                value: None,
                attributes,
            };
        };

        let expected_at = |index: usize| {
            running
                .get(index)
                .and_then(|(_, at)| serde_json::to_value(at).ok())
                .unwrap_or(Value::Null)
        };

        let mut attributes = first.attributes();
        attributes.insert(ATTR_NEXT.to_string(), expected_at(1));
        attributes.insert(ATTR_NEXT_ON.to_string(), expected_at(2));
        attributes.insert(ATTR_CONNECTIONS.to_string(), connections);

        Self {
            available: true,
            value: Some(first_at),
            attributes,
        }
    }

    /// Number of entries under `connections`
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.attributes
            .get(ATTR_CONNECTIONS)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}

impl Default for SensorState {
    fn default() -> Self {
        Self::unavailable()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use crate::entities::trip::{Departure, Journey, Leg, TransportMode};
    use crate::value_objects::Station;

    use super::*;

    fn at(minute: u32) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(&format!("2026-03-02T08:{minute:02}:00+01:00")).unwrap()
    }

    fn timestamp(value: DateTime<FixedOffset>) -> Value {
        serde_json::to_value(value).unwrap()
    }

    fn journey(minute: u32, delay_secs: i64, cancelled: bool) -> TripCandidate {
        let leg = Leg {
            origin: Station::new("1", "Neumarkt"),
            destination: Station::new("2", "Köln Hbf"),
            departure: at(minute),
            departure_delay: Some(TimeDelta::seconds(delay_secs)),
            departure_platform: None,
            arrival: Some(at(minute + 10)),
            arrival_delay: None,
            arrival_platform: None,
            mode: TransportMode::Train,
            name: Some("16".to_string()),
            cancelled,
            distance: None,
            remarks: Vec::new(),
            stopovers: Vec::new(),
        };
        TripCandidate::from_journey(&Journey { legs: vec![leg] }).unwrap()
    }

    #[test]
    fn first_running_candidate_wins() {
        let candidates = vec![
            journey(0, 60, false),
            journey(5, 0, true),
            journey(10, 0, false),
        ];
        let state = SensorState::from_candidates(&candidates);

        assert!(state.available);
        assert_eq!(state.value, Some(at(1)));
        assert_eq!(state.attributes[ATTR_NEXT], timestamp(at(10)));
        assert_eq!(state.attributes[ATTR_NEXT_ON], Value::Null);
        assert_eq!(state.connection_count(), 3);

        let connections = state.attributes[ATTR_CONNECTIONS].as_array().unwrap();
        assert_eq!(connections[1]["canceled"], Value::Bool(true));
        assert!(!state.attributes.contains_key("legs"));
        assert_eq!(state.attributes["origin"], "Neumarkt");
        assert_eq!(state.attributes["delay"], "0:01:00");
    }

    #[test]
    fn three_running_candidates_fill_next_on() {
        let candidates = vec![
            journey(0, 0, false),
            journey(10, 120, false),
            journey(20, 0, false),
        ];
        let state = SensorState::from_candidates(&candidates);
        assert_eq!(state.attributes[ATTR_NEXT], timestamp(at(12)));
        assert_eq!(state.attributes[ATTR_NEXT_ON], timestamp(at(20)));
    }

    #[test]
    fn unrepresentable_delay_is_skipped() {
        let candidates = vec![
            journey(0, 1_000_000_000_000_000, false),
            journey(10, 0, false),
        ];
        let state = SensorState::from_candidates(&candidates);

        assert_eq!(state.value, Some(at(10)));
        assert_eq!(state.attributes[ATTR_NEXT], Value::Null);
        assert_eq!(state.connection_count(), 2);
    }

    #[test]
    fn all_cancelled_has_no_value_but_lists_connections() {
        let candidates = vec![journey(0, 0, true), journey(10, 0, true)];
        let state = SensorState::from_candidates(&candidates);

        assert!(state.available);
        assert!(state.value.is_none());
        assert_eq!(state.attributes.len(), 1);
        let connections = state.attributes[ATTR_CONNECTIONS].as_array().unwrap();
        assert_eq!(connections.len(), 2);
        assert!(connections.iter().all(|c| c["canceled"] == Value::Bool(true)));
    }

    #[test]
    fn empty_list_publishes_empty_connections() {
        let state = SensorState::from_candidates(&[]);
        assert!(state.available);
        assert!(state.value.is_none());
        assert_eq!(state.attributes[ATTR_CONNECTIONS], Value::Array(Vec::new()));
    }

    #[test]
    fn departure_board_state() {
        let station = Station::new("1", "Neumarkt");
        let entry = Departure {
            when: at(30),
            delay: None,
            direction: Some("Bensberg".to_string()),
            name: Some("1".to_string()),
            platform: Some("A".to_string()),
            cancelled: false,
        };
        let state = SensorState::from_candidates(&[TripCandidate::from_departure(&entry, &station)]);
        assert_eq!(state.value, Some(at(30)));
        assert_eq!(state.attributes["destination"], "Bensberg");
        assert!(!state.attributes.contains_key("transfers"));
    }

    #[test]
    fn unavailable_state_is_empty() {
        let state = SensorState::unavailable();
        assert!(!state.available);
        assert!(state.value.is_none());
        assert!(state.attributes.is_empty());
        assert_eq!(SensorState::default(), state);
    }
}
