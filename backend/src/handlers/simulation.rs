//! HTTP handlers for the simulated sensor feed

use std::time::Duration;

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use shared::{evaluate, AdvisoryMessage, SensorRecord};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::dashboard::SimulationView;
use crate::services::simulation::RunSettings;
use crate::AppState;

/// Current simulation view
pub async fn get_simulation(State(state): State<AppState>) -> Json<SimulationView> {
    Json(state.simulation.view().await)
}

/// Optional overrides for a simulation run
#[derive(Debug, Default, Deserialize, Validate)]
pub struct StartSimulationInput {
    #[validate(range(min = 1, max = 1000, message = "iterations must be between 1 and 1000"))]
    pub iterations: Option<u32>,

    #[validate(range(min = 0, max = 60000, message = "interval_ms must be between 0 and 60000"))]
    pub interval_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct StartSimulationResponse {
    pub run_id: Uuid,
    pub iterations: u32,
    pub interval_ms: u64,
}

/// Start a background simulation run; an absent body runs with the configured defaults
pub async fn start_simulation(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<StartSimulationResponse>)> {
    let input = parse_start_input(&body)?;
    input.validate()?;

    let defaults = state.simulation.defaults();
    let settings = RunSettings {
        iterations: input.iterations.unwrap_or(defaults.iterations),
        interval: input
            .interval_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.interval),
    };

    let run_id = state.simulation.start(settings).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(StartSimulationResponse {
            run_id,
            iterations: settings.iterations,
            interval_ms: settings.interval.as_millis() as u64,
        }),
    ))
}

fn parse_start_input(body: &[u8]) -> AppResult<StartSimulationInput> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(StartSimulationInput::default());
    }
    Json::<StartSimulationInput>::from_bytes(body)
        .map(|Json(input)| input)
        .map_err(|rejection| AppError::ValidationError(rejection.body_text()))
}

#[derive(Debug, Serialize)]
pub struct StepResponse {
    pub record: SensorRecord,
    pub advice: Vec<AdvisoryMessage>,
}

/// Take a single reading immediately
pub async fn step_simulation(State(state): State<AppState>) -> Json<StepResponse> {
    let record = state.simulation.step().await;
    let advice = evaluate(&record.reading);
    Json(StepResponse { record, advice })
}

/// Clear the sensor log
pub async fn clear_simulation(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.simulation.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}
