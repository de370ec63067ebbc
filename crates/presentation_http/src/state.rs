//! Application state shared across handlers

use std::sync::Arc;

use application::{ForecastReport, ForecastService};
use chrono::Utc;
use domain::RoundingMode;
use infrastructure::{TemplateEngine, TemplateError, WindowConfig};

use crate::error::ApiError;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Fetch and reconcile pipeline
    pub service: Arc<ForecastService>,
    /// Report templates
    pub templates: TemplateEngine,
    /// Daily window settings, resolved per request
    pub window: WindowConfig,
    /// Display rounding
    pub rounding: RoundingMode,
}

impl AppState {
    /// Create state with the embedded report templates
    pub fn new(
        service: Arc<ForecastService>,
        window: WindowConfig,
        rounding: RoundingMode,
    ) -> Result<Self, TemplateError> {
        Ok(Self {
            service,
            templates: TemplateEngine::new()?,
            window,
            rounding,
        })
    }

    /// Run the pipeline for today's window
    pub async fn build_report(&self) -> Result<ForecastReport, ApiError> {
        let window = self.window.resolve(Utc::now())?;
        Ok(self.service.build_report(window).await)
    }
}
