//! Forecast adapter - Implements ForecastPort using integration_weather

use application::error::ApplicationError;
use application::ports::{ForecastPort, ModelComparison};
use async_trait::async_trait;
use domain::{ForecastModel, ForecastWindow, GeoLocation, ModelSeries};
use integration_weather::{
    HourlyForecast, HourlyRequest, HourlyVariable, OpenMeteoClient, WeatherClient, WeatherConfig,
    WeatherError, WeatherModel,
};
use tracing::{debug, instrument};

/// Adapter fetching both models from the Open-Meteo API
pub struct OpenMeteoForecastAdapter {
    client: Box<dyn WeatherClient>,
}

impl std::fmt::Debug for OpenMeteoForecastAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenMeteoForecastAdapter")
            .field("client", &"OpenMeteoClient")
            .finish()
    }
}

impl OpenMeteoForecastAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(WeatherConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client =
            OpenMeteoClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self::with_client(Box::new(client)))
    }

    /// Wrap an existing weather client
    #[must_use]
    pub fn with_client(client: Box<dyn WeatherClient>) -> Self {
        Self { client }
    }

    /// Open-Meteo model backing a forecast model
    const fn upstream_model(model: ForecastModel) -> WeatherModel {
        match model {
            ForecastModel::Ecmwf => WeatherModel::EcmwfSeamless,
            ForecastModel::Gfs => WeatherModel::GfsSeamless,
        }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            WeatherError::ParseError(e) => {
                ApplicationError::ExternalService(format!("Undecodable response: {e}"))
            },
            WeatherError::InvalidCoordinates => {
                ApplicationError::Configuration("Invalid coordinates".into())
            },
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }

    /// Extract one model's series from the hourly block
    fn model_series(forecast: &HourlyForecast, model: ForecastModel) -> ModelSeries {
        let upstream = Self::upstream_model(model);
        ModelSeries::new(
            forecast.series(HourlyVariable::Temperature2m, upstream),
            forecast.series(HourlyVariable::Precipitation, upstream),
        )
    }
}

#[async_trait]
impl ForecastPort for OpenMeteoForecastAdapter {
    #[instrument(skip(self, window), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn fetch_model_series(
        &self,
        location: &GeoLocation,
        window: &ForecastWindow,
    ) -> Result<ModelComparison, ApplicationError> {
        let request = HourlyRequest::contest(
            location.latitude(),
            location.longitude(),
            window.start_iso(),
            window.end_iso(),
            window.timezone().as_str(),
        );

        let forecast = self
            .client
            .get_hourly(&request)
            .await
            .map_err(Self::map_error)?;

        let comparison = ModelComparison {
            ecmwf: Self::model_series(&forecast, ForecastModel::Ecmwf),
            gfs: Self::model_series(&forecast, ForecastModel::Gfs),
        };

        debug!(
            ecmwf_hours = comparison.ecmwf.temperatures_c.len(),
            gfs_hours = comparison.gfs.temperatures_c.len(),
            "Retrieved model series"
        );

        Ok(comparison)
    }
}
