//! HTTP handlers for the dashboard API

mod advisory;
mod dashboard;
mod forecast;
mod health;
mod simulation;

pub use advisory::*;
pub use dashboard::*;
pub use forecast::*;
pub use health::*;
pub use simulation::*;
