//! Hourly model output and its per-model reduction

use serde::{Deserialize, Serialize};

/// Hourly temperature and precipitation from one model for one station
///
/// Either sequence may be empty when the upstream response lacks the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSeries {
    /// Hourly 2 m temperature in °C
    pub temperatures_c: Vec<f64>,
    /// Hourly precipitation in mm
    pub precipitation_mm: Vec<f64>,
}

impl ModelSeries {
    /// Create a series from its two hourly sequences
    pub fn new(temperatures_c: Vec<f64>, precipitation_mm: Vec<f64>) -> Self {
        Self {
            temperatures_c,
            precipitation_mm,
        }
    }

    /// Highest hourly temperature, `None` when there are no readings
    #[must_use]
    pub fn max_temperature(&self) -> Option<f64> {
        self.temperatures_c.iter().copied().reduce(f64::max)
    }

    /// Accumulated precipitation, `None` when there are no readings
    #[must_use]
    pub fn total_precipitation(&self) -> Option<f64> {
        if self.precipitation_mm.is_empty() {
            None
        } else {
            Some(self.precipitation_mm.iter().sum())
        }
    }

    /// Whether either sequence is empty
    #[must_use]
    pub fn has_missing_data(&self) -> bool {
        self.temperatures_c.is_empty() || self.precipitation_mm.is_empty()
    }
}

/// Summary statistics of one model, unrounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Maximum hourly temperature in °C
    pub max_temperature_c: f64,
    /// Total precipitation in mm
    pub total_precipitation_mm: f64,
}

impl ModelSummary {
    /// Summarize a series, reading missing data as 0.0
    #[must_use]
    pub fn zero_filled(series: &ModelSeries) -> Self {
        Self {
            max_temperature_c: series.max_temperature().unwrap_or(0.0),
            total_precipitation_mm: series.total_precipitation().unwrap_or(0.0),
        }
    }

    /// Summarize a series, or `None` if either sequence is empty
    #[must_use]
    pub fn strict(series: &ModelSeries) -> Option<Self> {
        Some(Self {
            max_temperature_c: series.max_temperature()?,
            total_precipitation_mm: series.total_precipitation()?,
        })
    }
}
