//! Display formatting for delays and durations

use chrono::TimeDelta;
use serde::Serializer;

/// Rendering of an absent or zero duration
pub const ZERO_DURATION: &str = "0:00:00";

/// Format a delay or duration as `H:MM:SS`
///
/// An absent or zero value renders as [`ZERO_DURATION`]. Hours are not
/// wrapped into days, and negative values (early departures) carry a
/// leading `-`.
#[must_use]
pub fn format_duration(value: Option<TimeDelta>) -> String {
    let Some(delta) = value.filter(|d| !d.is_zero()) else {
        return ZERO_DURATION.to_string();
    };

    let total = delta.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let secs = total.unsigned_abs();

    format!(
        "{sign}{}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

/// Serde adapter writing an optional duration through [`format_duration`]
#[allow(clippy::ref_option)] // serialize_with hands us `&Option<T>`
pub(crate) fn serialize_formatted<S: Serializer>(
    value: &Option<TimeDelta>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_duration(*value))
}
