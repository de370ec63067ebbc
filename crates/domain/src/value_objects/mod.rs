//! Value Objects - Immutable, identity-less domain primitives

mod forecast_model;
mod forecast_window;
mod geo_location;
mod rounding;
mod timezone;

pub use forecast_model::ForecastModel;
pub use forecast_window::ForecastWindow;
pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use rounding::RoundingMode;
pub use timezone::Timezone;
