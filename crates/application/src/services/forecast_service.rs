//! Forecast service - fetch, reconcile and aggregate one contest day
//!
//! Stations are fetched concurrently through the forecast port. Results are
//! collected in registry order, reconciled, and summarized per region. A
//! station whose fetch fails is left out of every table and aggregate.

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use domain::{
    ForecastModel, ForecastWindow, MissingDataPolicy, ReconciliationRules, Region, RoundingMode,
    Station, StationForecast, StationRegistry,
};
use futures::{StreamExt, stream};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::regional_aggregator::{RegionalAggregator, RegionalSummary};
use crate::{
    error::ApplicationError,
    ports::{ForecastPort, ModelComparison},
};

/// Default number of stations fetched at once
const DEFAULT_FETCH_CONCURRENCY: usize = 4;

/// Why a station is missing from the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The upstream request failed outright
    FetchFailed(String),
    /// Neither model returned usable data (strict mode only)
    NoData,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchFailed(error) => write!(f, "fetch failed: {error}"),
            Self::NoData => f.write_str("no data from either model"),
        }
    }
}

/// A registered station left out of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedStation {
    /// Station name
    pub station: String,
    /// Reason it was skipped
    pub reason: SkipReason,
}

/// Everything produced by one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    /// Window the forecasts cover
    pub window: ForecastWindow,
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
    /// Rules the forecasts were reconciled with
    pub rules: ReconciliationRules,
    /// Reconciled forecasts in registry order
    pub forecasts: Vec<StationForecast>,
    /// Stations left out, in registry order
    pub skipped: Vec<SkippedStation>,
    /// Headline metrics per configured region
    pub regions: Vec<RegionalSummary>,
}

impl ForecastReport {
    /// Whether no station produced a forecast
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forecasts.is_empty()
    }
}

/// Service producing the reconciled forecast report
pub struct ForecastService {
    port: Arc<dyn ForecastPort>,
    registry: Arc<StationRegistry>,
    regions: Vec<Region>,
    rules: ReconciliationRules,
    rounding: RoundingMode,
    concurrency: usize,
}

impl fmt::Debug for ForecastService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastService")
            .field("stations", &self.registry.len())
            .field("regions", &self.regions.len())
            .field("rules", &self.rules)
            .field("rounding", &self.rounding)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl ForecastService {
    /// Create a service with default rules and concurrency
    pub fn new(
        port: Arc<dyn ForecastPort>,
        registry: Arc<StationRegistry>,
        regions: Vec<Region>,
    ) -> Self {
        Self {
            port,
            registry,
            regions,
            rules: ReconciliationRules::default(),
            rounding: RoundingMode::default(),
            concurrency: DEFAULT_FETCH_CONCURRENCY,
        }
    }

    /// Use custom reconciliation rules
    #[must_use]
    pub fn with_rules(mut self, rules: ReconciliationRules) -> Self {
        self.rules = rules;
        self
    }

    /// Precision at which regional maxima are compared
    #[must_use]
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Limit the number of concurrent fetches (at least one)
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Registered stations
    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    /// Configured regions
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Rules in effect
    pub const fn rules(&self) -> &ReconciliationRules {
        &self.rules
    }

    /// Build the report for a window, stamped with the current time
    pub async fn build_report(&self, window: ForecastWindow) -> ForecastReport {
        self.build_report_at(window, Utc::now()).await
    }

    /// Build the report for a window with an explicit generation time
    #[instrument(skip(self, window), fields(window = %window, stations = self.registry.len()))]
    pub async fn build_report_at(
        &self,
        window: ForecastWindow,
        generated_at: DateTime<Utc>,
    ) -> ForecastReport {
        let fetched = self.fetch_all(&window).await;

        let mut forecasts = Vec::with_capacity(fetched.len());
        let mut skipped = Vec::new();
        for (station, result) in fetched {
            match result {
                Ok(comparison) => match self.reconcile(station, &comparison) {
                    Some(forecast) => forecasts.push(forecast),
                    None => {
                        warn!(station = %station.name(), "Skipping station: no data from either model");
                        skipped.push(SkippedStation {
                            station: station.name().to_string(),
                            reason: SkipReason::NoData,
                        });
                    },
                },
                Err(e) => {
                    warn!(station = %station.name(), error = %e, "Skipping station: fetch failed");
                    skipped.push(SkippedStation {
                        station: station.name().to_string(),
                        reason: SkipReason::FetchFailed(e.to_string()),
                    });
                },
            }
        }

        let aggregator = RegionalAggregator::new(&forecasts, self.rounding);
        let regions = self
            .regions
            .iter()
            .map(|region| aggregator.summarize(region))
            .collect();

        info!(
            forecasts = forecasts.len(),
            skipped = skipped.len(),
            "Forecast report built"
        );

        ForecastReport {
            window,
            generated_at,
            rules: self.rules,
            forecasts,
            skipped,
            regions,
        }
    }

    async fn fetch_all<'a>(
        &'a self,
        window: &'a ForecastWindow,
    ) -> Vec<(&'a Station, Result<ModelComparison, ApplicationError>)> {
        let port = self.port.as_ref();
        stream::iter(self.registry.iter())
            .map(move |station: &'a Station| async move {
                let result = port.fetch_model_series(station.location(), window).await;
                (station, result)
            })
            .boxed()
            .buffered(self.concurrency)
            .collect()
            .await
    }

    fn reconcile(&self, station: &Station, comparison: &ModelComparison) -> Option<StationForecast> {
        if self.rules.missing_data == MissingDataPolicy::ZeroFill {
            for model in ForecastModel::ALL {
                if comparison.series(model).has_missing_data() {
                    warn!(
                        station = %station.name(),
                        model = %model,
                        "Empty model series, reading missing values as 0.0"
                    );
                }
            }
        }
        StationForecast::reconcile(
            station.name(),
            &comparison.ecmwf,
            &comparison.gfs,
            &self.rules,
        )
    }
}
