//! Deterministic generation estimates from resource availability.
//!
//! # Examples
//!
//! ```
//! use renew_sim::sim::{SimulationInput, simulate};
//!
//! let out = simulate(&SimulationInput::new(80.0, 50.0, 100.0));
//! assert_eq!(out.solar_kw, 800.0);
//! assert_eq!(out.wind_kw, 125.0);
//! assert_eq!(out.hydro_kw, 900.0);
//! ```

/// Solar, wind and hydro power curves.
pub mod power;

pub use power::{PlantRatings, SimulationInput, SimulationOutput, round2, simulate};
