//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use tracing::{debug, warn};

use super::AppState;
use super::types::{ErrorResponse, ForecastResponse, HealthResponse};
use crate::forecast::ForecastInput;
use crate::sim::{SimulationInput, SimulationOutput};

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Maps an extractor rejection to its status with a JSON error body.
fn reject(rejection: JsonRejection) -> ApiError {
    let status = rejection.status();
    let error = rejection.body_text();
    warn!(%status, %error, "Rejected request body");
    (status, Json(ErrorResponse { error }))
}

/// Estimates per-source output from availability percentages.
///
/// `POST /simulate` → 200 + `SimulationOutput` JSON
/// Missing fields count as 0.
pub async fn post_simulate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SimulationInput>, JsonRejection>,
) -> Result<Json<SimulationOutput>, ApiError> {
    let Json(input) = payload.map_err(reject)?;
    let output = state.plant.simulate(&input);
    debug!(?input, ?output, "Simulated generation");
    Ok(Json(output))
}

/// Forecasts next-step generation.
///
/// `POST /forecast` → 200 + `ForecastResponse` JSON
/// `POST /forecast` without `solar_kw`/`wind_kw`/`hydro_kw` → 422 + `ErrorResponse`
pub async fn post_forecast(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ForecastInput>, JsonRejection>,
) -> Result<Json<ForecastResponse>, ApiError> {
    let Json(input) = payload.map_err(reject)?;
    let prediction = state.forecaster.predict(&input);
    debug!(?input, ?prediction, "Forecast generation");
    Ok(Json(ForecastResponse::from(prediction)))
}

/// `GET /health` → 200 + `{"status": "backend running"}`
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse::running())
}
