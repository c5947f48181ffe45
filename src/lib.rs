//! Renewable generation estimates and next-step forecasts.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod error;
pub mod forecast;
/// Regression model artifacts.
pub mod model;
/// Solar, wind and hydro power simulation.
pub mod sim;
