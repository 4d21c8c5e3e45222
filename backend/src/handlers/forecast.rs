//! HTTP handlers for forecast series and metrics

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{AppError, AppResult};
use crate::services::dashboard::{render_forecasts, ForecastView};
use crate::services::forecast::{MetricsPanel, SeriesPanel};
use crate::AppState;

/// All forecast sections and metric tables
pub async fn get_forecasts(State(state): State<AppState>) -> AppResult<Json<ForecastView>> {
    let loader = state.forecasts.clone();
    let report = tokio::task::spawn_blocking(move || loader.load_all()).await?;
    Ok(Json(render_forecasts(report)))
}

/// A single series panel by catalog name
pub async fn get_forecast_series(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<SeriesPanel>> {
    let source = state
        .forecasts
        .config()
        .find_series(&name)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Forecast series {}", name)))?;

    let loader = state.forecasts.clone();
    let panel = tokio::task::spawn_blocking(move || loader.series_panel(&source)).await?;
    Ok(Json(panel))
}

/// Summary metric tables
pub async fn get_forecast_metrics(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MetricsPanel>>> {
    let loader = state.forecasts.clone();
    let panels = tokio::task::spawn_blocking(move || {
        loader
            .config()
            .metrics
            .iter()
            .map(|m| loader.metrics_panel(m))
            .collect::<Vec<_>>()
    })
    .await?;
    Ok(Json(panels))
}
