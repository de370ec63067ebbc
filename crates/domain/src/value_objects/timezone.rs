//! Timezone value object

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A validated IANA timezone
///
/// Backed by the chrono-tz database so that window boundaries are computed
/// in the forecast region's local time rather than the host's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timezone(Tz);

impl Timezone {
    /// Parse an IANA timezone name
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the name is not in the
    /// IANA database.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        name.parse::<Tz>()
            .map(Self)
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
    }

    /// Get the IANA name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0.name()
    }

    /// Get the underlying chrono-tz zone
    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.0
    }

    /// Asia/Kolkata, the contest region's timezone
    #[must_use]
    pub const fn kolkata() -> Self {
        Self(Tz::Asia__Kolkata)
    }

    /// UTC
    #[must_use]
    pub const fn utc() -> Self {
        Self(Tz::UTC)
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self::kolkata()
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for Timezone {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timezone> for String {
    fn from(tz: Timezone) -> Self {
        tz.as_str().to_string()
    }
}
