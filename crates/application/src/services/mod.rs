//! Application services - Use case implementations

mod forecast_service;
mod regional_aggregator;

pub use forecast_service::{ForecastReport, ForecastService, SkipReason, SkippedStation};
pub use regional_aggregator::{HottestStation, RainyCount, RegionalAggregator, RegionalSummary};
