//! Common types used across the dashboard

use serde::{Deserialize, Serialize};

/// Dashboard data modes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DataMode {
    /// Simulated real-time sensor feed with advisories
    #[default]
    Simulation,
    /// Pre-computed forecast series and metric tables
    Forecasts,
}

impl DataMode {
    pub fn label(&self) -> &'static str {
        match self {
            DataMode::Simulation => "Real-time Sensor Simulation",
            DataMode::Forecasts => "Model Forecasts",
        }
    }
}

impl std::fmt::Display for DataMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Closed numeric interval `[min, max]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Both bounds finite and `min <= max`
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}
