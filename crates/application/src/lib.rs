//! Application layer - Use cases and orchestration
//!
//! Defines the forecast port, the regional aggregator and the service that
//! turns a station registry into a reconciled forecast report.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
