//! Station registry
//!
//! The registry is the single source of truth for which stations are
//! forecast and in which order they are reported. It is built once from
//! configuration and passed explicitly to everything that needs it.

use serde::Serialize;
use std::collections::HashSet;

use crate::{errors::DomainError, value_objects::GeoLocation};

/// A named forecast point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    name: String,
    location: GeoLocation,
}

impl Station {
    /// Create a station
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyStationName` if the name is blank.
    pub fn new(name: impl Into<String>, location: GeoLocation) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::EmptyStationName);
        }
        Ok(Self { name, location })
    }

    /// Create a station from raw coordinates
    ///
    /// # Errors
    ///
    /// Returns an error for a blank name or out-of-range coordinates.
    pub fn at(name: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        let name = name.into();
        let location = GeoLocation::new(latitude, longitude)
            .map_err(|_| DomainError::InvalidCoordinates(name.clone()))?;
        Self::new(name, location)
    }

    /// Station name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Station coordinates
    #[must_use]
    pub const fn location(&self) -> &GeoLocation {
        &self.location
    }
}

/// Ordered, immutable set of uniquely named stations
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StationRegistry {
    stations: Vec<Station>,
}

impl StationRegistry {
    /// Build a registry, keeping the given order
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DuplicateStation` if two stations share a name.
    pub fn new(stations: Vec<Station>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(stations.len());
        for station in &stations {
            if !seen.insert(station.name()) {
                return Err(DomainError::DuplicateStation(station.name().to_string()));
            }
        }
        Ok(Self { stations })
    }

    /// Iterate stations in registration order
    pub fn iter(&self) -> std::slice::Iter<'_, Station> {
        self.stations.iter()
    }

    /// Station names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stations.iter().map(Station::name)
    }

    /// Look up a station by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.name() == name)
    }

    /// Whether a station with this name is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of stations
    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the registry has no stations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl<'a> IntoIterator for &'a StationRegistry {
    type Item = &'a Station;
    type IntoIter = std::slice::Iter<'a, Station>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(name: &str) -> Station {
        Station::at(name, 13.0, 80.0).expect("valid station")
    }

    #[test]
    fn test_station_name_is_trimmed() {
        let s = Station::at("  Nungambakkam ", 13.0632, 80.2495).expect("valid");
        assert_eq!(s.name(), "Nungambakkam");
    }

    #[test]
    fn test_blank_station_name_is_rejected() {
        assert_eq!(
            Station::at("   ", 13.0, 80.0).unwrap_err(),
            DomainError::EmptyStationName
        );
    }

    #[test]
    fn test_out_of_range_coordinates_name_the_station() {
        let err = Station::at("Nowhere", 123.0, 80.0).unwrap_err();
        assert_eq!(err, DomainError::InvalidCoordinates("Nowhere".to_string()));
    }

    #[test]
    fn test_registry_preserves_order() {
        let registry =
            StationRegistry::new(vec![station("Pasighat"), station("Kodaikanal"), station("Ooty PTO")])
                .expect("valid registry");
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["Pasighat", "Kodaikanal", "Ooty PTO"]);
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let err = StationRegistry::new(vec![station("Cholavaram"), station("Cholavaram")])
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateStation("Cholavaram".to_string()));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = StationRegistry::new(vec![station("Dharmapuri")]).expect("valid");
        assert!(registry.contains("Dharmapuri"));
        assert!(!registry.contains("Madurai"));
        assert_eq!(registry.get("Dharmapuri").map(Station::name), Some("Dharmapuri"));
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_empty_registry_is_allowed() {
        let registry = StationRegistry::new(Vec::new()).expect("valid");
        assert!(registry.is_empty());
    }
}
