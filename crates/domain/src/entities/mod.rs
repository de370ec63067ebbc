//! Domain entities

mod model_series;
mod region;
mod station;
mod station_forecast;

pub use model_series::{ModelSeries, ModelSummary};
pub use region::{Region, StationSubset};
pub use station::{Station, StationRegistry};
pub use station_forecast::{MissingDataPolicy, ReconciliationRules, StationForecast};
