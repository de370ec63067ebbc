//! Integration tests for the weather client using wiremock
//!
//! These tests verify the weather client's behavior against a mock HTTP server,
//! ensuring proper handling of various response scenarios.

use std::time::Duration;

use integration_weather::{
    HourlyRequest, HourlyVariable, OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError,
    WeatherModel,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Sample multi-model Open-Meteo response for testing
fn sample_hourly_response() -> serde_json::Value {
    serde_json::json!({
        "latitude": 13.0625,
        "longitude": 80.25,
        "generationtime_ms": 0.211,
        "utc_offset_seconds": 19800,
        "timezone": "Asia/Kolkata",
        "timezone_abbreviation": "IST",
        "elevation": 9.0,
        "hourly_units": {
            "time": "iso8601",
            "temperature_2m_ecmwf_seamless": "°C",
            "temperature_2m_gfs_seamless": "°C",
            "precipitation_ecmwf_seamless": "mm",
            "precipitation_gfs_seamless": "mm"
        },
        "hourly": {
            "time": ["2026-10-18T09:00", "2026-10-18T10:00", "2026-10-18T11:00"],
            "temperature_2m_ecmwf_seamless": [28.2, 30.4, 29.7],
            "temperature_2m_gfs_seamless": [28.9, 30.9, 30.1],
            "precipitation_ecmwf_seamless": [0.0, 3.2, 1.8],
            "precipitation_gfs_seamless": [0.0, 0.4, 1.6]
        }
    })
}

fn contest_request() -> HourlyRequest {
    HourlyRequest::contest(
        13.0632,
        80.2495,
        "2026-10-18T08:30:00",
        "2026-10-19T08:30:00",
        "Asia/Kolkata",
    )
}

/// Create a test client configured to use the mock server
///
/// # Panics
///
/// Panics if the client cannot be created (should not happen in tests).
fn create_test_client(mock_server: &MockServer) -> OpenMeteoClient {
    let config = WeatherConfig {
        base_url: mock_server.uri(),
        timeout_secs: 5,
    };
    #[allow(clippy::expect_used)]
    OpenMeteoClient::new(config).expect("Failed to create client")
}

/// Setup a mock for the /forecast endpoint with the given response
async fn setup_forecast_mock(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn test_get_hourly_success() {
    let mock_server = MockServer::start().await;
    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(sample_hourly_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    let forecast = client.get_hourly(&contest_request()).await.unwrap();

    assert_eq!(
        forecast.series(HourlyVariable::Temperature2m, WeatherModel::EcmwfSeamless),
        vec![28.2, 30.4, 29.7]
    );
    assert_eq!(
        forecast.series(HourlyVariable::Precipitation, WeatherModel::GfsSeamless),
        vec![0.0, 0.4, 1.6]
    );
}

#[tokio::test]
async fn test_request_carries_contest_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("latitude", "13.0632"))
        .and(query_param("longitude", "80.2495"))
        .and(query_param("hourly", "temperature_2m,precipitation"))
        .and(query_param("models", "ecmwf_seamless,gfs_seamless"))
        .and(query_param("start", "2026-10-18T08:30:00"))
        .and(query_param("end", "2026-10-19T08:30:00"))
        .and(query_param("timezone", "Asia/Kolkata"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_hourly_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_hourly(&contest_request()).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_missing_model_keys_give_empty_series() {
    let mock_server = MockServer::start().await;
    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": 13.0625,
            "longitude": 80.25,
            "hourly": {
                "time": ["2026-10-18T09:00"],
                "temperature_2m_gfs_seamless": [29.0]
            }
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let forecast = client.get_hourly(&contest_request()).await.unwrap();

    assert!(
        forecast
            .series(HourlyVariable::Temperature2m, WeatherModel::EcmwfSeamless)
            .is_empty()
    );
    assert!(
        forecast
            .series(HourlyVariable::Precipitation, WeatherModel::GfsSeamless)
            .is_empty()
    );
    assert_eq!(
        forecast.series(HourlyVariable::Temperature2m, WeatherModel::GfsSeamless),
        vec![29.0]
    );
}

#[tokio::test]
async fn test_missing_hourly_block_is_not_an_error() {
    let mock_server = MockServer::start().await;
    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": 13.0625,
            "longitude": 80.25
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let forecast = client.get_hourly(&contest_request()).await.unwrap();

    assert!(forecast.hourly.is_empty());
}

#[tokio::test]
async fn test_null_hours_are_dropped() {
    let mock_server = MockServer::start().await;
    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hourly": {
                "precipitation_ecmwf_seamless": [0.5, null, 2.0, null]
            }
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let forecast = client.get_hourly(&contest_request()).await.unwrap();

    assert_eq!(
        forecast.series(HourlyVariable::Precipitation, WeatherModel::EcmwfSeamless),
        vec![0.5, 2.0]
    );
}

// ============================================================================
// Error scenarios
// ============================================================================

#[tokio::test]
async fn test_rate_limit_error() {
    let mock_server = MockServer::start().await;
    setup_forecast_mock(&mock_server, ResponseTemplate::new(429)).await;

    let client = create_test_client(&mock_server);
    let result = client.get_hourly(&contest_request()).await;

    assert!(matches!(result, Err(WeatherError::RateLimitExceeded)));
}

#[tokio::test]
async fn test_server_error() {
    let mock_server = MockServer::start().await;
    setup_forecast_mock(&mock_server, ResponseTemplate::new(503)).await;

    let client = create_test_client(&mock_server);
    let result = client.get_hourly(&contest_request()).await;

    assert!(matches!(result, Err(WeatherError::ServiceUnavailable(_))));
}

#[tokio::test]
async fn test_client_error() {
    let mock_server = MockServer::start().await;
    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Parameter 'start' is invalid"
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_hourly(&contest_request()).await;

    match result {
        Err(WeatherError::RequestFailed(message)) => assert!(message.contains("400")),
        other => unreachable!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_response() {
    let mock_server = MockServer::start().await;
    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("not valid json"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_hourly(&contest_request()).await;

    assert!(matches!(result, Err(WeatherError::ParseError(_))));
}

#[tokio::test]
async fn test_timeout_is_request_failure() {
    let mock_server = MockServer::start().await;
    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200)
            .set_body_json(sample_hourly_response())
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let config = WeatherConfig {
        base_url: mock_server.uri(),
        timeout_secs: 1,
    };
    let client = OpenMeteoClient::new(config).unwrap();
    let result = client.get_hourly(&contest_request()).await;

    assert!(matches!(result, Err(WeatherError::RequestFailed(_))));
}

#[tokio::test]
async fn test_invalid_coordinates_make_no_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let mut request = contest_request();
    request.latitude = 95.0;
    let result = client.get_hourly(&request).await;

    assert!(matches!(result, Err(WeatherError::InvalidCoordinates)));
}
