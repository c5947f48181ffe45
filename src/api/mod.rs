//! HTTP API for generation simulation and forecasting.
//!
//! Endpoints:
//! - `POST /simulate`: availability percentages to per-source kW
//! - `POST /forecast`: next-step generation forecast
//! - `GET /health`: liveness probe

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::error::ServiceError;
use crate::forecast::Forecaster;
use crate::sim::PlantRatings;

pub use types::{ErrorResponse, ForecastResponse, HealthResponse};

/// Immutable application state shared across all request handlers.
///
/// Built once at startup and wrapped in `Arc`; nothing in it changes
/// afterwards, so handlers need no locks.
#[derive(Debug)]
pub struct AppState {
    /// Plant capacities for `/simulate`.
    pub plant: PlantRatings,
    /// Model-backed or fallback forecaster for `/forecast`.
    pub forecaster: Forecaster,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/simulate", post(handlers::post_simulate))
        .route("/forecast", post(handlers::post_forecast))
        .route("/health", get(handlers::get_health))
        .with_state(state)
}

/// Binds to the given address and serves the API until ctrl-c.
///
/// # Errors
///
/// Returns `ServiceError::Bind` if the listener cannot bind to `addr`, or
/// `ServiceError::Serve` if the server fails while running.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> Result<(), ServiceError> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServiceError::Bind { addr, source })?;
    info!(%addr, "API server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
