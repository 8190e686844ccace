//! Forecast services: the single-shot pipeline behind the dashboard.

pub mod dashboard;
pub mod forecast;

pub use dashboard::build_dashboard;
pub use forecast::{forecast, trailing_mean, Delta, ForecastPair};
