//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::services::simulation::SimulationStatus;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub forecast_data_dir: String,
    pub simulation: SimulationStatus,
    pub log_records: usize,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        forecast_data_dir: state.forecasts.config().data_dir.display().to_string(),
        simulation: state.simulation.status().await,
        log_records: state.simulation.log_len().await,
    })
}
