//! Reconciled per-station forecast
//!
//! GFS is the default model. ECMWF only takes over when both models agree
//! on the peak temperature within the tolerance and ECMWF predicts strictly
//! more rain. The final values are always copied from one model, never
//! blended, and every comparison uses unrounded values.

use serde::{Deserialize, Serialize};

use super::{ModelSeries, ModelSummary};
use crate::value_objects::ForecastModel;

/// How a model with an empty hourly sequence is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDataPolicy {
    /// Empty sequences summarize to 0.0
    #[default]
    ZeroFill,
    /// A model with an empty sequence is unavailable
    Strict,
}

/// Thresholds driving model selection and the rain flag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationRules {
    /// Peak temperatures must differ by less than this for ECMWF to win
    pub agreement_tolerance_c: f64,
    /// Minimum final precipitation for a rainy station (inclusive)
    pub rain_threshold_mm: f64,
    /// Treatment of empty model sequences
    pub missing_data: MissingDataPolicy,
}

impl Default for ReconciliationRules {
    fn default() -> Self {
        Self {
            agreement_tolerance_c: 1.0,
            rain_threshold_mm: 2.5,
            missing_data: MissingDataPolicy::ZeroFill,
        }
    }
}

impl ReconciliationRules {
    /// Pick the confidence model for two model summaries
    #[must_use]
    pub fn select_confidence(&self, ecmwf: &ModelSummary, gfs: &ModelSummary) -> ForecastModel {
        let temperatures_agree =
            (ecmwf.max_temperature_c - gfs.max_temperature_c).abs() < self.agreement_tolerance_c;
        let ecmwf_wetter = ecmwf.total_precipitation_mm > gfs.total_precipitation_mm;

        if temperatures_agree && ecmwf_wetter {
            ForecastModel::Ecmwf
        } else {
            ForecastModel::Gfs
        }
    }

    /// Whether a precipitation total counts as a rainy day
    #[must_use]
    pub fn is_rainy(&self, precipitation_mm: f64) -> bool {
        precipitation_mm >= self.rain_threshold_mm
    }

    fn summarize(&self, series: &ModelSeries) -> Option<ModelSummary> {
        match self.missing_data {
            MissingDataPolicy::ZeroFill => Some(ModelSummary::zero_filled(series)),
            MissingDataPolicy::Strict => ModelSummary::strict(series),
        }
    }
}

/// Best-guess forecast for one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationForecast {
    /// Station name
    pub station: String,
    /// ECMWF summary, absent only in strict mode
    pub ecmwf: Option<ModelSummary>,
    /// GFS summary, absent only in strict mode
    pub gfs: Option<ModelSummary>,
    /// Model the final values were taken from
    pub confidence: ForecastModel,
    /// Selected model's maximum temperature in °C
    pub final_temperature_c: f64,
    /// Selected model's total precipitation in mm
    pub final_precipitation_mm: f64,
    /// Final precipitation reaches the rain threshold
    pub meets_rain_threshold: bool,
}

impl StationForecast {
    /// Reconcile both models' hourly series into a station forecast
    ///
    /// Returns `None` when neither model has usable data, which only
    /// happens under `MissingDataPolicy::Strict`.
    #[must_use]
    pub fn reconcile(
        station: impl Into<String>,
        ecmwf: &ModelSeries,
        gfs: &ModelSeries,
        rules: &ReconciliationRules,
    ) -> Option<Self> {
        let ecmwf = rules.summarize(ecmwf);
        let gfs = rules.summarize(gfs);

        let (confidence, selected) = match (&ecmwf, &gfs) {
            (Some(e), Some(g)) => match rules.select_confidence(e, g) {
                ForecastModel::Ecmwf => (ForecastModel::Ecmwf, *e),
                ForecastModel::Gfs => (ForecastModel::Gfs, *g),
            },
            (Some(e), None) => (ForecastModel::Ecmwf, *e),
            (None, Some(g)) => (ForecastModel::Gfs, *g),
            (None, None) => return None,
        };

        Some(Self {
            station: station.into(),
            ecmwf,
            gfs,
            confidence,
            final_temperature_c: selected.max_temperature_c,
            final_precipitation_mm: selected.total_precipitation_mm,
            meets_rain_threshold: rules.is_rainy(selected.total_precipitation_mm),
        })
    }

    /// Summary of the given model, if available
    #[must_use]
    pub const fn summary(&self, model: ForecastModel) -> Option<&ModelSummary> {
        match model {
            ForecastModel::Ecmwf => self.ecmwf.as_ref(),
            ForecastModel::Gfs => self.gfs.as_ref(),
        }
    }
}
