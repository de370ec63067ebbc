//! Domain layer for the weather contest forecaster
//!
//! Contains the station registry, model series, the dual-model
//! reconciliation rule and the value objects they are built from.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
