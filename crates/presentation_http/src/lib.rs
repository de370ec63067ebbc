//! Weather contest HTTP presentation layer
//!
//! Serves the dashboard and the JSON report. Every request runs the full
//! fetch and reconcile pipeline.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
