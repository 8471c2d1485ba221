//! Query time offset value object

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Time shift applied to "now" when querying, as entered in the wizard
///
/// Mirrors the duration field of the setup form, so a stored value looks
/// like `{"hours": 0, "minutes": 10, "seconds": 0}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOffset {
    /// Whole days
    #[serde(default)]
    pub days: u32,
    /// Whole hours
    #[serde(default)]
    pub hours: u32,
    /// Whole minutes
    #[serde(default)]
    pub minutes: u32,
    /// Whole seconds
    #[serde(default)]
    pub seconds: u32,
}

impl TimeOffset {
    /// Largest accepted offset, in days
    pub const MAX_DAYS: u32 = 365;

    /// Offset of the given number of minutes
    #[must_use]
    pub const fn from_minutes(minutes: u32) -> Self {
        Self {
            days: 0,
            hours: 0,
            minutes,
            seconds: 0,
        }
    }

    const fn total_seconds(&self) -> i64 {
        // u32 components cannot overflow i64 here
        self.days as i64 * 86_400
            + self.hours as i64 * 3_600
            + self.minutes as i64 * 60
            + self.seconds as i64
    }

    // total offset as a duration
    #[must_use]
    fn to_duration(&self) -> TimeDelta {
        // at most ~3.9e14 seconds, well inside the TimeDelta range
        TimeDelta::seconds(self.total_seconds())
    }

    /// Whether the offset shifts nothing
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.total_seconds() == 0
    }

    /// Check the offset against [`Self::MAX_DAYS`]
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::OffsetOutOfRange`] when the components add up
    /// to more than the limit.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.total_seconds() > i64::from(Self::MAX_DAYS) * 86_400 {
            return Err(DomainError::OffsetOutOfRange {
                max_days: Self::MAX_DAYS,
            });
        }
        Ok(())
    }

    /// Apply the offset to `now`
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::OffsetOutOfRange`] when the offset fails
    /// [`Self::validate`] or the shifted time is not representable.
    pub fn shift(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, DomainError> {
        self.validate()?;
        now.checked_add_signed(self.to_duration())
            .ok_or(DomainError::OffsetOutOfRange {
                max_days: Self::MAX_DAYS,
            })
    }
}
