//! Mode-switched dashboard endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::DataMode;

use crate::error::AppResult;
use crate::services::dashboard::{render_forecasts, DashboardView};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub mode: Option<DataMode>,
}

/// Render the dashboard for the requested mode
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DashboardView>> {
    let mode = query.mode.unwrap_or_default();
    tracing::debug!(%mode, "Rendering dashboard");

    let view = match mode {
        DataMode::Simulation => DashboardView::Simulation(state.simulation.view().await),
        DataMode::Forecasts => {
            let loader = state.forecasts.clone();
            let report = tokio::task::spawn_blocking(move || loader.load_all()).await?;
            DashboardView::Forecasts(render_forecasts(report))
        }
    };
    Ok(Json(view))
}
