//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Dashboard
        .route("/", get(handlers::dashboard::dashboard))
        // Health
        .route("/health", get(handlers::health::health_check))
        // Report API (v1)
        .route("/v1/forecast", get(handlers::forecast::get_forecast))
        .route("/v1/stations", get(handlers::stations::list_stations))
        // Attach state
        .with_state(state)
}
