//! API response types.
//!
//! Request bodies reuse [`crate::sim::SimulationInput`] and
//! [`crate::forecast::ForecastInput`] directly.

use serde::{Deserialize, Serialize};

use crate::forecast::Prediction;

/// Forecast response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ForecastResponse {
    /// Forecast next-step generation (kW).
    pub gen_kw: f64,
    /// `"model"` or `"fallback"`.
    pub source: String,
}

impl From<Prediction> for ForecastResponse {
    fn from(p: Prediction) -> Self {
        Self {
            gen_kw: p.gen_kw(),
            source: p.source().to_string(),
        }
    }
}

/// Liveness probe body.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub const RUNNING: &'static str = "backend running";

    pub fn running() -> Self {
        Self {
            status: Self::RUNNING.to_string(),
        }
    }
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_response_from_prediction_keeps_source() {
        let model = ForecastResponse::from(Prediction::Model(12.5));
        assert_eq!(model.gen_kw, 12.5);
        assert_eq!(model.source, "model");

        let fallback = ForecastResponse::from(Prediction::Fallback(60.0));
        assert_eq!(fallback.gen_kw, 60.0);
        assert_eq!(fallback.source, "fallback");
    }

    #[test]
    fn health_serializes_status() {
        let json = serde_json::to_value(HealthResponse::running()).expect("serialize");
        assert_eq!(json, serde_json::json!({ "status": "backend running" }));
    }
}
