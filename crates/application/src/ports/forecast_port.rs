//! Forecast source port
//!
//! Defines the interface for retrieving both models' hourly output for one
//! station over a forecast window.

use async_trait::async_trait;
use domain::{ForecastModel, ForecastWindow, GeoLocation, ModelSeries};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Hourly output of both models for the same station and window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelComparison {
    /// ECMWF hourly series
    pub ecmwf: ModelSeries,
    /// GFS hourly series
    pub gfs: ModelSeries,
}

impl ModelComparison {
    /// Series of the given model
    #[must_use]
    pub const fn series(&self, model: ForecastModel) -> &ModelSeries {
        match model {
            ForecastModel::Ecmwf => &self.ecmwf,
            ForecastModel::Gfs => &self.gfs,
        }
    }
}

/// Port for multi-model forecast retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastPort: Send + Sync {
    /// Fetch both models' hourly series for a location
    ///
    /// A successful response with missing fields yields empty series; only
    /// transport, status and decoding failures are errors.
    async fn fetch_model_series(
        &self,
        location: &GeoLocation,
        window: &ForecastWindow,
    ) -> Result<ModelComparison, ApplicationError>;
}
