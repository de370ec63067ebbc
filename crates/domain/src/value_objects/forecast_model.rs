//! Numerical weather prediction model identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two forecast sources that are reconciled per station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForecastModel {
    /// European Centre for Medium-Range Weather Forecasts
    #[serde(rename = "ECMWF")]
    Ecmwf,
    /// NOAA Global Forecast System
    #[serde(rename = "GFS")]
    Gfs,
}

impl ForecastModel {
    /// Both models, in display order
    pub const ALL: [Self; 2] = [Self::Ecmwf, Self::Gfs];

    /// Short display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ecmwf => "ECMWF",
            Self::Gfs => "GFS",
        }
    }
}

impl fmt::Display for ForecastModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
