//! Services behind the dashboard API

pub mod dashboard;
pub mod forecast;
pub mod simulation;

pub use forecast::ForecastLoader;
pub use simulation::SimulationService;
