//! Weather data models
//!
//! Types for multi-model hourly requests and responses of the Open-Meteo
//! forecast API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Numerical model requested from Open-Meteo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherModel {
    /// ECMWF IFS blended with higher-resolution regional runs
    EcmwfSeamless,
    /// NOAA GFS blended with higher-resolution regional runs
    GfsSeamless,
}

impl WeatherModel {
    /// Identifier used in the `models` query parameter and response keys
    #[must_use]
    pub const fn api_name(&self) -> &'static str {
        match self {
            Self::EcmwfSeamless => "ecmwf_seamless",
            Self::GfsSeamless => "gfs_seamless",
        }
    }
}

impl fmt::Display for WeatherModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Hourly variable requested from Open-Meteo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourlyVariable {
    /// Air temperature at 2 m in °C
    #[serde(rename = "temperature_2m")]
    Temperature2m,
    /// Total precipitation of the preceding hour in mm
    Precipitation,
}

impl HourlyVariable {
    /// Identifier used in the `hourly` query parameter and response keys
    #[must_use]
    pub const fn api_name(&self) -> &'static str {
        match self {
            Self::Temperature2m => "temperature_2m",
            Self::Precipitation => "precipitation",
        }
    }
}

/// Parameters of one hourly multi-model request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRequest {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Variables to fetch
    pub variables: Vec<HourlyVariable>,
    /// Models to fetch
    pub models: Vec<WeatherModel>,
    /// Local start time, `YYYY-MM-DDTHH:MM:SS`
    pub start: String,
    /// Local end time, `YYYY-MM-DDTHH:MM:SS`
    pub end: String,
    /// IANA timezone the start, end and response times are expressed in
    pub timezone: String,
}

impl HourlyRequest {
    /// Temperature and precipitation from both seamless models
    pub fn contest(
        latitude: f64,
        longitude: f64,
        start: impl Into<String>,
        end: impl Into<String>,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            variables: vec![HourlyVariable::Temperature2m, HourlyVariable::Precipitation],
            models: vec![WeatherModel::EcmwfSeamless, WeatherModel::GfsSeamless],
            start: start.into(),
            end: end.into(),
            timezone: timezone.into(),
        }
    }

    /// Query string pairs in the order Open-Meteo documents them
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("hourly", join(self.variables.iter().map(HourlyVariable::api_name))),
            ("models", join(self.models.iter().map(WeatherModel::api_name))),
            ("start", self.start.clone()),
            ("end", self.end.clone()),
            ("timezone", self.timezone.clone()),
        ]
    }
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(",")
}

/// Hourly multi-model forecast for one location
///
/// The hourly block is kept as raw JSON so that a missing or malformed
/// variable only empties that one series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    /// Raw hourly block keyed by `{variable}_{model}`
    #[serde(default)]
    pub hourly: Map<String, Value>,
}

impl HourlyForecast {
    /// Numeric values of one variable from one model
    ///
    /// Missing keys and non-array values give an empty series. Entries that
    /// are not numbers (Open-Meteo sends `null` for hours a model does not
    /// cover) are dropped.
    #[must_use]
    pub fn series(&self, variable: HourlyVariable, model: WeatherModel) -> Vec<f64> {
        let key = format!("{}_{}", variable.api_name(), model.api_name());
        self.hourly
            .get(&key)
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_f64).collect())
            .unwrap_or_default()
    }
}

/// Raw API response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiResponse {
    pub hourly: Option<Map<String, Value>>,
}

impl From<ApiResponse> for HourlyForecast {
    fn from(response: ApiResponse) -> Self {
        Self {
            hourly: response.hourly.unwrap_or_default(),
        }
    }
}
