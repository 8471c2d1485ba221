//! Raw `hafas-rest-api` response types and their conversion into domain types

use chrono::{DateTime, FixedOffset, TimeDelta};
use domain::{Departure, Journey, Leg, Remark, Station, Stopover, TransportMode};
use serde::Deserialize;

use crate::error::HafasError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawJourneysResponse {
    #[serde(default)]
    pub journeys: Vec<RawJourney>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawJourney {
    #[serde(default)]
    pub legs: Vec<RawLeg>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawLeg {
    pub origin: RawStop,
    pub destination: RawStop,
    pub departure: Option<DateTime<FixedOffset>>,
    pub planned_departure: Option<DateTime<FixedOffset>>,
    pub departure_delay: Option<i64>,
    pub departure_platform: Option<String>,
    pub planned_departure_platform: Option<String>,
    pub arrival: Option<DateTime<FixedOffset>>,
    pub planned_arrival: Option<DateTime<FixedOffset>>,
    pub arrival_delay: Option<i64>,
    pub arrival_platform: Option<String>,
    pub planned_arrival_platform: Option<String>,
    pub line: Option<RawLine>,
    #[serde(default)]
    pub walking: bool,
    #[serde(default)]
    pub cancelled: bool,
    pub distance: Option<u32>,
    #[serde(default)]
    pub remarks: Vec<RawRemark>,
    #[serde(default)]
    pub stopovers: Vec<RawStopover>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawStop {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLine {
    pub name: Option<String>,
    pub mode: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRemark {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawStopover {
    pub stop: RawStop,
    #[serde(default)]
    pub cancelled: bool,
}

/// `/stops/:id/departures` answers either `{"departures": [...]}` (v6) or a
/// bare array (older deployments)
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawDeparturesResponse {
    Wrapped { departures: Vec<RawDeparture> },
    Bare(Vec<RawDeparture>),
}

impl RawDeparturesResponse {
    pub fn into_departures(self) -> Vec<RawDeparture> {
        match self {
            Self::Wrapped { departures } | Self::Bare(departures) => departures,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDeparture {
    pub when: Option<DateTime<FixedOffset>>,
    pub planned_when: Option<DateTime<FixedOffset>>,
    pub delay: Option<i64>,
    pub platform: Option<String>,
    pub planned_platform: Option<String>,
    pub direction: Option<String>,
    pub line: Option<RawLine>,
    #[serde(default)]
    pub cancelled: bool,
}

impl From<RawStop> for Station {
    fn from(raw: RawStop) -> Self {
        Self::new(raw.id.unwrap_or_default(), raw.name.unwrap_or_default())
    }
}

impl TryFrom<RawJourney> for Journey {
    type Error = HafasError;

    fn try_from(raw: RawJourney) -> Result<Self, Self::Error> {
        let legs = raw
            .legs
            .into_iter()
            .map(Leg::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { legs })
    }
}

impl TryFrom<RawLeg> for Leg {
    type Error = HafasError;

    fn try_from(raw: RawLeg) -> Result<Self, Self::Error> {
        let departure = raw.planned_departure.or(raw.departure).ok_or_else(|| {
            HafasError::Malformed("leg without departure time".to_string())
        })?;

        let mode = if raw.walking {
            TransportMode::Walking
        } else {
            raw.line
                .as_ref()
                .and_then(|l| l.mode.as_deref())
                .map_or_else(
                    || TransportMode::Other("unknown".to_string()),
                    TransportMode::from_provider,
                )
        };

        Ok(Self {
            origin: raw.origin.into(),
            destination: raw.destination.into(),
            departure,
            departure_delay: delay(raw.departure_delay)?,
            departure_platform: raw.departure_platform.or(raw.planned_departure_platform),
            arrival: raw.planned_arrival.or(raw.arrival),
            arrival_delay: delay(raw.arrival_delay)?,
            arrival_platform: raw.arrival_platform.or(raw.planned_arrival_platform),
            mode,
            name: raw.line.and_then(|l| l.name),
            cancelled: raw.cancelled,
            distance: raw.distance,
            remarks: raw.remarks.into_iter().filter_map(remark).collect(),
            stopovers: raw
                .stopovers
                .into_iter()
                .map(|s| Stopover {
                    stop: s.stop.into(),
                    cancelled: s.cancelled,
                })
                .collect(),
        })
    }
}

/// Delay in seconds as reported by the endpoint
fn delay(seconds: Option<i64>) -> Result<Option<TimeDelta>, HafasError> {
    seconds
        .map(|secs| {
            TimeDelta::try_seconds(secs)
                .ok_or_else(|| HafasError::Malformed(format!("delay out of range: {secs}")))
        })
        .transpose()
}

fn remark(raw: RawRemark) -> Option<Remark> {
    raw.text
        .filter(|t| !t.trim().is_empty())
        .map(|text| Remark { text })
}

impl TryFrom<RawDeparture> for Departure {
    type Error = HafasError;

    fn try_from(raw: RawDeparture) -> Result<Self, Self::Error> {
        let when = raw.planned_when.or(raw.when).ok_or_else(|| {
            HafasError::Malformed("departure without time".to_string())
        })?;

        Ok(Self {
            when,
            delay: delay(raw.delay)?,
            direction: raw.direction,
            name: raw.line.and_then(|l| l.name),
            platform: raw.platform.or(raw.planned_platform),
            cancelled: raw.cancelled,
        })
    }
}
