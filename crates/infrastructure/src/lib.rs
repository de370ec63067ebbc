//! Infrastructure layer - Adapters for external systems
//!
//! Implements the forecast port over Open-Meteo and provides configuration
//! loading, tracing setup and report rendering.

pub mod adapters;
pub mod config;
pub mod telemetry;
pub mod templates;

pub use adapters::OpenMeteoForecastAdapter;
pub use config::{
    AppConfig, ConfigValidationError, ContestSettings, ReconciliationConfig, RegionConfig,
    ServerConfig, StationConfig, WeatherAppConfig, WindowConfig,
};
pub use telemetry::{LogFormat, init_tracing};
pub use templates::{OutputFormat, ReportView, TemplateEngine, TemplateError};
