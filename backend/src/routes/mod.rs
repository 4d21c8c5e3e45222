//! Route definitions for the Green Flags dashboard

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Mode switcher
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/advisories/evaluate", post(handlers::evaluate_reading))
        .nest("/simulation", simulation_routes())
        .nest("/forecasts", forecast_routes())
}

/// Simulated sensor feed routes
fn simulation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::get_simulation).delete(handlers::clear_simulation),
        )
        .route("/start", post(handlers::start_simulation))
        .route("/step", post(handlers::step_simulation))
}

/// Forecast file routes
fn forecast_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_forecasts))
        .route("/metrics", get(handlers::get_forecast_metrics))
        .route("/series/:name", get(handlers::get_forecast_series))
}
