//! Forecast window value object
//!
//! The contest scores a fixed local-time day: 08:30 today until 08:30
//! tomorrow in the region's timezone. Window construction takes `now` as an
//! argument so it stays deterministic in tests.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{errors::DomainError, value_objects::Timezone};

/// Format used for window boundaries on the wire (`2026-10-18T08:30:00`)
const ISO_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A local-time interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
    timezone: Timezone,
}

impl ForecastWindow {
    /// Create a window from a local start time and a length
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWindow` if the duration is not positive.
    pub fn new(
        start: NaiveDateTime,
        duration: TimeDelta,
        timezone: Timezone,
    ) -> Result<Self, DomainError> {
        if duration <= TimeDelta::zero() {
            return Err(DomainError::InvalidWindow(
                "duration must be positive".to_string(),
            ));
        }
        let end = start
            .checked_add_signed(duration)
            .ok_or_else(|| DomainError::InvalidWindow("end time overflows".to_string()))?;
        Ok(Self {
            start,
            end,
            timezone,
        })
    }

    /// Window starting at `hour:minute` local time on the local date of `now`
    ///
    /// The start is always on today's local date, even when `now` is
    /// earlier than the start time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWindow` for an out-of-range time of day
    /// or a zero duration.
    pub fn daily_from(
        now: DateTime<Utc>,
        timezone: Timezone,
        hour: u32,
        minute: u32,
        duration_hours: u32,
    ) -> Result<Self, DomainError> {
        let local_date = now.with_timezone(&timezone.tz()).date_naive();
        let start = local_date.and_hms_opt(hour, minute, 0).ok_or_else(|| {
            DomainError::InvalidWindow(format!("{hour:02}:{minute:02} is not a valid time"))
        })?;
        let duration = TimeDelta::try_hours(i64::from(duration_hours))
            .ok_or_else(|| DomainError::InvalidWindow("duration overflows".to_string()))?;
        Self::new(start, duration, timezone)
    }

    /// Timezone the boundaries are expressed in
    #[must_use]
    pub const fn timezone(&self) -> Timezone {
        self.timezone
    }

    /// Start as an ISO-8601 local timestamp
    #[must_use]
    pub fn start_iso(&self) -> String {
        self.start.format(ISO_LOCAL_FORMAT).to_string()
    }

    /// End as an ISO-8601 local timestamp
    #[must_use]
    pub fn end_iso(&self) -> String {
        self.end.format(ISO_LOCAL_FORMAT).to_string()
    }
}

impl fmt::Display for ForecastWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {} {}",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M"),
            self.timezone
        )
    }
}
