//! Weather contest HTTP server
//!
//! Main entry point for the dashboard server.

use std::{path::PathBuf, sync::Arc};

use application::ForecastService;
use axum::http::Method;
use infrastructure::{AppConfig, LogFormat, OpenMeteoForecastAdapter, init_tracing};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Log filter used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Environment variable naming the configuration file
const CONFIG_PATH_ENV: &str = "WEATHER_CONTEST_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    let loaded = AppConfig::load(config_path.as_deref());

    let log_format = loaded
        .as_ref()
        .map_or(LogFormat::default(), |config| config.server.log_format);
    init_tracing(DEFAULT_LOG_FILTER, log_format)?;

    info!("Weather contest server v{} starting", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });
    let settings = config.contest_settings()?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        stations = settings.registry.len(),
        regions = settings.regions.len(),
        "Configuration loaded"
    );

    let adapter = OpenMeteoForecastAdapter::with_config(config.weather.client_config())?;
    let service = ForecastService::new(
        Arc::new(adapter),
        Arc::new(settings.registry),
        settings.regions,
    )
    .with_rules(settings.rules)
    .with_rounding(settings.rounding)
    .with_concurrency(config.weather.fetch_concurrency);

    let state = AppState::new(Arc::new(service), config.window.clone(), settings.rounding)?;

    let app = routes::create_router(state).layer(TraceLayer::new_for_http());
    let app = if config.server.cors_enabled {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers(Any),
        )
    } else {
        app
    };

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Dashboard on http://{addr}/");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
