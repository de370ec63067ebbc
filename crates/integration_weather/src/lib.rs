//! Open-Meteo weather integration
//!
//! Client for the Open-Meteo Weather API (<https://open-meteo.com>).
//! Fetches hourly temperature and precipitation from several numerical
//! models in one request, without requiring an API key.

pub mod client;
mod models;

pub use client::{OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{HourlyForecast, HourlyRequest, HourlyVariable, WeatherModel};
