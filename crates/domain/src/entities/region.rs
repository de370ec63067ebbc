//! Named station subsets used for regional headline metrics

use serde::{Deserialize, Serialize};

use super::StationRegistry;
use crate::errors::DomainError;

/// Which registered stations belong to a group
///
/// `AllExcept` is evaluated against the registry at query time, so a
/// station added to the registry joins every exclusion-based region
/// without further configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationSubset {
    /// Every registered station
    All,
    /// Exactly the named stations
    Only(Vec<String>),
    /// Every registered station except the named ones
    AllExcept(Vec<String>),
}

impl StationSubset {
    /// Whether a station name is a member of this subset
    #[must_use]
    pub fn includes(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => names.iter().any(|n| n == name),
            Self::AllExcept(excluded) => !excluded.iter().any(|n| n == name),
        }
    }

    /// Member names in registry order
    #[must_use]
    pub fn members<'a>(&self, registry: &'a StationRegistry) -> Vec<&'a str> {
        registry.names().filter(|name| self.includes(name)).collect()
    }

    /// Check that every explicitly named station is registered
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownStation` for the first unregistered name.
    pub fn validate_against(
        &self,
        region: &str,
        registry: &StationRegistry,
    ) -> Result<(), DomainError> {
        let named = match self {
            Self::All => return Ok(()),
            Self::Only(names) | Self::AllExcept(names) => names,
        };
        named
            .iter()
            .find(|name| !registry.contains(name))
            .map_or(Ok(()), |name| Err(DomainError::unknown_station(region, name.as_str())))
    }
}

/// A named group of stations with a display label
///
/// The hottest station is picked from `subset`; rainy stations are counted
/// over `rainy_subset`, which is the same group unless set separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    /// Short name, e.g. "Chennai"
    pub name: String,
    /// Heading used when the region's metrics are rendered
    pub label: String,
    /// Candidates for the hottest station
    pub subset: StationSubset,
    /// Stations counted for the rainy metric
    pub rainy_subset: StationSubset,
}

impl Region {
    /// Create a region whose members are all registered
    ///
    /// # Errors
    ///
    /// Returns an error for a blank name or a reference to an unknown station.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        subset: StationSubset,
        registry: &StationRegistry,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::EmptyRegionName);
        }
        subset.validate_against(&name, registry)?;
        let label = label.into();
        let label = if label.trim().is_empty() {
            name.clone()
        } else {
            label
        };
        Ok(Self {
            name,
            label,
            rainy_subset: subset.clone(),
            subset,
        })
    }

    /// Count rainy stations over a different group than the hottest station
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownStation` if the group names an
    /// unregistered station.
    pub fn with_rainy_subset(
        mut self,
        rainy_subset: StationSubset,
        registry: &StationRegistry,
    ) -> Result<Self, DomainError> {
        rainy_subset.validate_against(&self.name, registry)?;
        self.rainy_subset = rainy_subset;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Station;

    fn registry() -> StationRegistry {
        let stations = [
            "Nungambakkam",
            "Meenambakkam",
            "Dharmapuri",
            "Ooty PTO",
            "Kodaikanal",
            "Pasighat",
        ]
        .into_iter()
        .map(|name| Station::at(name, 12.0, 79.0).expect("valid"))
        .collect();
        StationRegistry::new(stations).expect("valid registry")
    }

    fn owned(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn only_subset_keeps_registry_order() {
        let subset = StationSubset::Only(owned(&["Meenambakkam", "Nungambakkam"]));
        assert_eq!(
            subset.members(&registry()),
            vec!["Nungambakkam", "Meenambakkam"]
        );
    }

    #[test]
    fn all_except_is_registry_minus_exclusions() {
        let subset = StationSubset::AllExcept(owned(&["Pasighat", "Ooty PTO", "Kodaikanal"]));
        assert_eq!(
            subset.members(&registry()),
            vec!["Nungambakkam", "Meenambakkam", "Dharmapuri"]
        );
    }

    #[test]
    fn all_except_picks_up_new_stations() {
        let subset = StationSubset::AllExcept(owned(&["Pasighat"]));
        assert!(subset.includes("Tiruvallur"));
        assert!(!subset.includes("Pasighat"));
    }

    #[test]
    fn all_includes_everything() {
        assert_eq!(StationSubset::All.members(&registry()).len(), 6);
    }

    #[test]
    fn unknown_member_is_rejected() {
        let subset = StationSubset::Only(owned(&["Nungambakkam", "Atlantis"]));
        let err = Region::new("Chennai", "Chennai", subset, &registry()).unwrap_err();
        assert_eq!(err, DomainError::unknown_station("Chennai", "Atlantis"));
    }

    #[test]
    fn unknown_exclusion_is_rejected() {
        let subset = StationSubset::AllExcept(owned(&["Munnar"]));
        let err = Region::new("Tamil Nadu", "", subset, &registry()).unwrap_err();
        assert_eq!(err, DomainError::unknown_station("Tamil Nadu", "Munnar"));
    }

    #[test]
    fn blank_region_name_is_rejected() {
        let err = Region::new(" ", "x", StationSubset::All, &registry()).unwrap_err();
        assert_eq!(err, DomainError::EmptyRegionName);
    }

    #[test]
    fn rainy_subset_defaults_to_members() {
        let subset = StationSubset::Only(owned(&["Nungambakkam"]));
        let region = Region::new("Chennai", "", subset.clone(), &registry()).expect("valid");
        assert_eq!(region.rainy_subset, subset);
    }

    #[test]
    fn rainy_subset_can_differ_from_candidates() {
        let region = Region::new(
            "Tamil Nadu",
            "TN",
            StationSubset::AllExcept(owned(&["Pasighat", "Ooty PTO", "Kodaikanal"])),
            &registry(),
        )
        .and_then(|r| r.with_rainy_subset(StationSubset::All, &registry()))
        .expect("valid");
        assert_eq!(region.subset.members(&registry()).len(), 3);
        assert_eq!(region.rainy_subset.members(&registry()).len(), 6);
    }

    #[test]
    fn unknown_rainy_member_is_rejected() {
        let region = Region::new("Chennai", "", StationSubset::All, &registry()).expect("valid");
        let err = region
            .with_rainy_subset(StationSubset::Only(owned(&["Atlantis"])), &registry())
            .unwrap_err();
        assert_eq!(err, DomainError::unknown_station("Chennai", "Atlantis"));
    }

    #[test]
    fn blank_label_falls_back_to_name() {
        let region = Region::new("Tamil Nadu", "", StationSubset::All, &registry()).expect("valid");
        assert_eq!(region.label, "Tamil Nadu");
    }
}
