//! Contest settings: stations, regions, forecast window and reconciliation.
//!
//! Defaults reproduce the SWM weather contest: ten stations, a Chennai
//! coastal cluster and a Tamil Nadu pool whose hottest station excludes the
//! hill stations and Pasighat, while its rainy count covers every station.

use chrono::{DateTime, Utc};
use domain::{
    DomainError, ForecastWindow, MissingDataPolicy, ReconciliationRules, RoundingMode, Station,
    StationSubset, Timezone,
};
use serde::{Deserialize, Serialize};

/// Daily forecast window settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// IANA timezone the window is anchored in
    #[serde(default)]
    pub timezone: Timezone,

    /// Local start hour
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,

    /// Local start minute
    #[serde(default = "default_start_minute")]
    pub start_minute: u32,

    /// Window length in hours
    #[serde(default = "default_duration_hours")]
    pub duration_hours: u32,
}

const fn default_start_hour() -> u32 {
    8
}

const fn default_start_minute() -> u32 {
    30
}

const fn default_duration_hours() -> u32 {
    24
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            timezone: Timezone::default(),
            start_hour: default_start_hour(),
            start_minute: default_start_minute(),
            duration_hours: default_duration_hours(),
        }
    }
}

impl WindowConfig {
    /// Window for the local day containing `now`
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<ForecastWindow, DomainError> {
        ForecastWindow::daily_from(
            now,
            self.timezone,
            self.start_hour,
            self.start_minute,
            self.duration_hours,
        )
    }
}

/// Confidence and rain flag settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationConfig {
    /// Maximum peak temperature difference for the models to agree
    #[serde(default = "default_agreement_tolerance")]
    pub agreement_tolerance_c: f64,

    /// Minimum final precipitation for a rainy station
    #[serde(default = "default_rain_threshold")]
    pub rain_threshold_mm: f64,

    /// Display rounding
    #[serde(default)]
    pub rounding: RoundingMode,

    /// Treatment of empty model series
    #[serde(default)]
    pub missing_data: MissingDataPolicy,
}

const fn default_agreement_tolerance() -> f64 {
    1.0
}

const fn default_rain_threshold() -> f64 {
    2.5
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            agreement_tolerance_c: default_agreement_tolerance(),
            rain_threshold_mm: default_rain_threshold(),
            rounding: RoundingMode::default(),
            missing_data: MissingDataPolicy::default(),
        }
    }
}

impl ReconciliationConfig {
    /// Domain rules for these settings
    #[must_use]
    pub const fn rules(&self) -> ReconciliationRules {
        ReconciliationRules {
            agreement_tolerance_c: self.agreement_tolerance_c,
            rain_threshold_mm: self.rain_threshold_mm,
            missing_data: self.missing_data,
        }
    }
}

/// One forecast station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    /// Unique station name
    pub name: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl StationConfig {
    fn new(name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            latitude,
            longitude,
        }
    }

    /// Validated domain station
    pub fn to_station(&self) -> Result<Station, DomainError> {
        Station::at(self.name.as_str(), self.latitude, self.longitude)
    }
}

/// One named group of stations
///
/// `include` lists the members explicitly, `exclude` takes every registered
/// station except the listed ones, and neither means all stations. `rainy`
/// overrides the group counted for rainy stations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Region name
    pub name: String,

    /// Heading for the region's metrics, defaults to the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Member stations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,

    /// Excluded stations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,

    /// Stations counted for the rainy metric, defaults to the members
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rainy: Option<StationSubset>,
}

impl RegionConfig {
    /// Membership rule, or `None` if both `include` and `exclude` are set
    #[must_use]
    pub fn subset(&self) -> Option<StationSubset> {
        match (&self.include, &self.exclude) {
            (Some(_), Some(_)) => None,
            (Some(names), None) => Some(StationSubset::Only(names.clone())),
            (None, Some(names)) => Some(StationSubset::AllExcept(names.clone())),
            (None, None) => Some(StationSubset::All),
        }
    }
}

/// The contest's station list
#[must_use]
pub fn default_stations() -> Vec<StationConfig> {
    vec![
        StationConfig::new("Nungambakkam", 13.0632, 80.2495),
        StationConfig::new("Meenambakkam", 12.9941, 80.1808),
        StationConfig::new("Sriperumbudur", 13.0300, 79.9495),
        StationConfig::new("Mahabalipuram", 12.6208, 80.1930),
        StationConfig::new("Gummidipoondi", 13.4072, 80.1085),
        StationConfig::new("Cholavaram", 13.2150, 80.1833),
        StationConfig::new("Dharmapuri", 12.1211, 78.1580),
        StationConfig::new("Ooty PTO", 11.4102, 76.6950),
        StationConfig::new("Kodaikanal", 10.2381, 77.4892),
        StationConfig::new("Pasighat", 28.0667, 95.3333),
    ]
}

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

/// The contest's regions
#[must_use]
pub fn default_regions() -> Vec<RegionConfig> {
    vec![
        RegionConfig {
            name: "Chennai".to_string(),
            label: Some("Chennai".to_string()),
            include: Some(names(&[
                "Nungambakkam",
                "Meenambakkam",
                "Sriperumbudur",
                "Mahabalipuram",
                "Gummidipoondi",
                "Cholavaram",
            ])),
            exclude: None,
            rainy: None,
        },
        RegionConfig {
            name: "Tamil Nadu".to_string(),
            label: Some("TN".to_string()),
            include: None,
            exclude: Some(names(&["Pasighat", "Ooty PTO", "Kodaikanal"])),
            rainy: Some(StationSubset::All),
        },
    ]
}
