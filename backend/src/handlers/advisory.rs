//! HTTP handlers for on-demand advisory evaluation

use axum::Json;
use serde::Serialize;
use shared::{evaluate, validate_reading_fields, AdvisoryMessage, EnvironmentalReading};

use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub reading: EnvironmentalReading,
    pub advisories: Vec<AdvisoryMessage>,
}

/// Evaluate a caller-supplied reading
pub async fn evaluate_reading(
    Json(reading): Json<EnvironmentalReading>,
) -> AppResult<Json<EvaluateResponse>> {
    validate_reading_fields(&reading).map_err(|(field, message)| AppError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    })?;

    Ok(Json(EvaluateResponse {
        advisories: evaluate(&reading),
        reading,
    }))
}
