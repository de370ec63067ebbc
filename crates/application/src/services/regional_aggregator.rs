//! Regional headline metrics
//!
//! Aggregates are computed only over records that are actually present, so
//! a subset whose members were all skipped yields "no data" and `0 / 0`
//! instead of an error or a fake zero. Temperatures are compared at display
//! precision, so two stations shown with the same value tie and the first
//! one in reporting order wins.

use std::fmt;

use domain::{Region, RoundingMode, StationForecast, StationSubset};
use serde::{Deserialize, Serialize};

/// Rainy stations out of the stations present in a subset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RainyCount {
    /// Stations meeting the rain threshold
    pub rainy: usize,
    /// Stations of the subset present in the result set
    pub total: usize,
}

impl fmt::Display for RainyCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.rainy, self.total)
    }
}

/// Station holding the highest final temperature of a subset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HottestStation {
    /// Station name
    pub station: String,
    /// Final temperature in °C, unrounded
    pub temperature_c: f64,
}

/// Headline metrics for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalSummary {
    /// Region name
    pub region: String,
    /// Display label
    pub label: String,
    /// Hottest station, absent when no member station is present
    pub hottest: Option<HottestStation>,
    /// Rainy stations among those present
    pub rainy: RainyCount,
}

/// Read-only view over one run's reconciled forecasts
#[derive(Debug, Clone, Copy)]
pub struct RegionalAggregator<'a> {
    forecasts: &'a [StationForecast],
    rounding: RoundingMode,
}

impl<'a> RegionalAggregator<'a> {
    /// Aggregate over forecasts in their reporting order
    pub const fn new(forecasts: &'a [StationForecast], rounding: RoundingMode) -> Self {
        Self {
            forecasts,
            rounding,
        }
    }

    fn members(&self, subset: &StationSubset) -> impl Iterator<Item = &'a StationForecast> {
        self.forecasts
            .iter()
            .filter(move |f| subset.includes(&f.station))
    }

    /// Highest final temperature in the subset
    #[must_use]
    pub fn max_temperature(&self, subset: &StationSubset) -> Option<f64> {
        self.argmax_temperature(subset).map(|(_, t)| t)
    }

    /// Station with the highest displayed final temperature, first one wins on ties
    ///
    /// The returned temperature is the station's unrounded value.
    #[must_use]
    pub fn argmax_temperature(&self, subset: &StationSubset) -> Option<(&'a str, f64)> {
        let shown = |t: f64| self.rounding.round_to_tenth(t);
        self.members(subset).fold(None, |best, forecast| match best {
            Some((_, t)) if shown(forecast.final_temperature_c) <= shown(t) => best,
            _ => Some((forecast.station.as_str(), forecast.final_temperature_c)),
        })
    }

    /// Rainy stations out of the subset's present stations
    #[must_use]
    pub fn rainy_count(&self, subset: &StationSubset) -> RainyCount {
        self.members(subset)
            .fold(RainyCount::default(), |count, forecast| RainyCount {
                rainy: count.rainy + usize::from(forecast.meets_rain_threshold),
                total: count.total + 1,
            })
    }

    /// All headline metrics for a region
    #[must_use]
    pub fn summarize(&self, region: &Region) -> RegionalSummary {
        RegionalSummary {
            region: region.name.clone(),
            label: region.label.clone(),
            hottest: self
                .argmax_temperature(&region.subset)
                .map(|(station, temperature_c)| HottestStation {
                    station: station.to_string(),
                    temperature_c,
                }),
            rainy: self.rainy_count(&region.rainy_subset),
        }
    }
}
