//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Station coordinates out of range
    #[error("Invalid coordinates for station {0}")]
    InvalidCoordinates(String),

    /// Station name missing or blank
    #[error("Station name must not be empty")]
    EmptyStationName,

    /// The same station name was registered twice
    #[error("Duplicate station: {0}")]
    DuplicateStation(String),

    /// A region refers to a station the registry does not know
    #[error("Region {region} references unknown station: {station}")]
    UnknownStation { region: String, station: String },

    /// Region name missing or blank
    #[error("Region name must not be empty")]
    EmptyRegionName,

    /// Timezone name not found in the IANA database
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Forecast window cannot be built
    #[error("Invalid forecast window: {0}")]
    InvalidWindow(String),
}

impl DomainError {
    /// Create an unknown station error
    pub fn unknown_station(region: impl Into<String>, station: impl Into<String>) -> Self {
        Self::UnknownStation {
            region: region.into(),
            station: station.into(),
        }
    }
}
