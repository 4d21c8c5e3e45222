//! Green Flags climate dashboard backend
//!
//! Serves the simulated sensor feed with advisories and the pre-computed
//! forecast series over a JSON API.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use services::{ForecastLoader, SimulationService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub simulation: SimulationService,
    pub forecasts: ForecastLoader,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let simulation = SimulationService::new(&config.simulation);
        Self::with_simulation(config, simulation)
    }

    /// State with an injected simulation service, e.g. a seeded source
    pub fn with_simulation(config: Config, simulation: SimulationService) -> Self {
        let forecasts = ForecastLoader::new(config.forecasts.clone());
        Self {
            config: Arc::new(config),
            simulation,
            forecasts,
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "The Green Flags - Climate Dashboard API v1"
}

/// Liveness endpoint
async fn health_check() -> &'static str {
    "OK"
}
