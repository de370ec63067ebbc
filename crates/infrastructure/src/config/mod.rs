//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `integrations`: Open-Meteo access
//! - `contest`: stations, regions, forecast window, reconciliation
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, then `WEATHER_CONTEST_*` environment variables with `__` between
//! nested keys (e.g. `WEATHER_CONTEST_SERVER__PORT=8080`).

mod contest;
mod integrations;
mod server;

use std::path::Path;

use domain::{DomainError, Region, ReconciliationRules, RoundingMode, StationRegistry};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use contest::{
    ReconciliationConfig, RegionConfig, StationConfig, WindowConfig, default_regions,
    default_stations,
};
pub use integrations::WeatherAppConfig;
pub use server::ServerConfig;

/// Environment variable prefix
const ENV_PREFIX: &str = "WEATHER_CONTEST";

/// Config file looked up in the working directory when no path is given
const DEFAULT_CONFIG_FILE: &str = "config";

/// Configuration that parses but does not make sense
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    /// A station, region or window setting is invalid
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A region sets both `include` and `exclude`
    #[error("Region {0} must set either include or exclude, not both")]
    AmbiguousRegion(String),

    /// A reconciliation threshold is negative or not finite
    #[error("Invalid threshold {name}: {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// Fetch concurrency of zero
    #[error("weather.fetch_concurrency must be at least 1")]
    InvalidConcurrency,
}

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Open-Meteo access
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Daily forecast window
    #[serde(default)]
    pub window: WindowConfig,

    /// Confidence rule, rain flag and display rounding
    #[serde(default)]
    pub reconciliation: ReconciliationConfig,

    /// Stations in reporting order
    #[serde(default = "default_stations")]
    pub stations: Vec<StationConfig>,

    /// Regions with headline metrics
    #[serde(default = "default_regions")]
    pub regions: Vec<RegionConfig>,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            weather: WeatherAppConfig::default(),
            window: WindowConfig::default(),
            reconciliation: ReconciliationConfig::default(),
            stations: default_stations(),
            regions: default_regions(),
            server: ServerConfig::default(),
        }
    }
}

/// Validated domain values derived from [`AppConfig`]
#[derive(Debug, Clone)]
pub struct ContestSettings {
    /// Station registry
    pub registry: StationRegistry,
    /// Regions resolved against the registry
    pub regions: Vec<Region>,
    /// Reconciliation rules
    pub rules: ReconciliationRules,
    /// Display rounding
    pub rounding: RoundingMode,
}

impl AppConfig {
    /// Load configuration from defaults, file and environment
    ///
    /// With `path` the file must exist; without it `config.toml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_from(path, None)
    }

    fn load_from(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            // Override with environment variables (e.g., WEATHER_CONTEST_WEATHER__TIMEOUT_SECS)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        debug!(
            stations = loaded.stations.len(),
            regions = loaded.regions.len(),
            "Configuration loaded"
        );
        Ok(loaded)
    }

    /// Serialize as TOML, e.g. to write a starter config file
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Convert into validated domain values
    pub fn contest_settings(&self) -> Result<ContestSettings, ConfigValidationError> {
        if self.weather.fetch_concurrency == 0 {
            return Err(ConfigValidationError::InvalidConcurrency);
        }
        for (name, value) in [
            (
                "agreement_tolerance_c",
                self.reconciliation.agreement_tolerance_c,
            ),
            ("rain_threshold_mm", self.reconciliation.rain_threshold_mm),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigValidationError::InvalidThreshold { name, value });
            }
        }

        let stations = self
            .stations
            .iter()
            .map(StationConfig::to_station)
            .collect::<Result<Vec<_>, _>>()?;
        let registry = StationRegistry::new(stations)?;

        let regions = self
            .regions
            .iter()
            .map(|region| {
                let subset = region
                    .subset()
                    .ok_or_else(|| ConfigValidationError::AmbiguousRegion(region.name.clone()))?;
                let label = region.label.clone().unwrap_or_default();
                let built = Region::new(region.name.as_str(), label, subset, &registry)?;
                Ok(match &region.rainy {
                    Some(rainy) => built.with_rainy_subset(rainy.clone(), &registry)?,
                    None => built,
                })
            })
            .collect::<Result<Vec<_>, ConfigValidationError>>()?;

        Ok(ContestSettings {
            registry,
            regions,
            rules: self.reconciliation.rules(),
            rounding: self.reconciliation.rounding,
        })
    }
}
