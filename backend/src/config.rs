//! Configuration management for the Green Flags dashboard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with GREENX__ prefix (e.g. GREENX__SERVER__PORT)

use std::path::{Path, PathBuf};

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{validate_sampling_range, Phenomenon, ValueRange};

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Sensor simulation configuration
    pub simulation: SimulationConfig,

    /// Forecast file catalog
    pub forecasts: ForecastConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    /// Readings taken per simulation run
    pub iterations: u32,

    /// Delay between simulated readings in milliseconds
    pub interval_ms: u64,

    /// Maximum records kept in the sensor log
    pub log_capacity: usize,

    /// Records shown in the latest-readings table
    pub display_rows: usize,

    /// Uniform sampling ranges per field
    #[serde(default)]
    pub ranges: SamplingRanges,
}

/// Uniform sampling range for each reading field
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SamplingRanges {
    pub vegetation_index: ValueRange,
    pub rainfall_mm: ValueRange,
    pub wind_speed: ValueRange,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    /// Directory the forecast files are resolved against
    pub data_dir: PathBuf,

    /// Rows shown in each series preview table
    pub preview_rows: usize,

    /// Forecast series files, in display order
    #[serde(default = "default_series_sources")]
    pub series: Vec<SeriesSource>,

    /// Summary metric files, in display order
    #[serde(default = "default_metrics_sources")]
    pub metrics: Vec<MetricsSource>,
}

/// A single actual-vs-predicted forecast file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SeriesSource {
    pub name: String,
    pub phenomenon: Phenomenon,
    pub horizon_days: u32,
    pub file: PathBuf,
    pub actual_column: String,
    pub predicted_column: String,
}

/// A summary metrics file for one phenomenon family
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MetricsSource {
    pub name: String,
    /// Any phenomenon of the dashboard section the table is shown under
    pub phenomenon: Phenomenon,
    pub file: PathBuf,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("GREENX_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("simulation.iterations", 30)?
            .set_default("simulation.interval_ms", 1000)?
            .set_default("simulation.log_capacity", 100)?
            .set_default("simulation.display_rows", 10)?
            .set_default("forecasts.data_dir", ".")?
            .set_default("forecasts.preview_rows", 5)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (GREENX_ prefix)
            .add_source(
                Environment::with_prefix("GREENX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the services cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ranges = &self.simulation.ranges;
        for (field, range) in [
            ("vegetation_index", &ranges.vegetation_index),
            ("rainfall_mm", &ranges.rainfall_mm),
            ("wind_speed", &ranges.wind_speed),
        ] {
            validate_sampling_range(range)
                .map_err(|e| ConfigError::Message(format!("simulation.ranges.{}: {}", field, e)))?;
        }

        if self.simulation.log_capacity == 0 {
            return Err(ConfigError::Message(
                "simulation.log_capacity must be greater than zero".into(),
            ));
        }
        if self.simulation.iterations == 0 {
            return Err(ConfigError::Message(
                "simulation.iterations must be greater than zero".into(),
            ));
        }

        let mut names = std::collections::HashSet::new();
        for source in &self.forecasts.series {
            if !names.insert(source.name.as_str()) {
                return Err(ConfigError::Message(format!(
                    "forecasts.series: duplicate series name {}",
                    source.name
                )));
            }
        }

        Ok(())
    }
}

impl ForecastConfig {
    /// Resolve a catalog file against the data directory
    pub fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.data_dir.join(file)
        }
    }

    pub fn find_series(&self, name: &str) -> Option<&SeriesSource> {
        self.series.iter().find(|s| s.name == name)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: 30,
            interval_ms: 1000,
            log_capacity: 100,
            display_rows: 10,
            ranges: SamplingRanges::default(),
        }
    }
}

impl Default for SamplingRanges {
    fn default() -> Self {
        Self {
            vegetation_index: ValueRange::new(0.2, 0.9),
            rainfall_mm: ValueRange::new(0.0, 20.0),
            wind_speed: ValueRange::new(0.0, 15.0),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            preview_rows: 5,
            series: default_series_sources(),
            metrics: default_metrics_sources(),
        }
    }
}

fn series(
    name: &str,
    phenomenon: Phenomenon,
    horizon_days: u32,
    file: &str,
    actual_column: &str,
    predicted_column: &str,
) -> SeriesSource {
    SeriesSource {
        name: name.to_string(),
        phenomenon,
        horizon_days,
        file: PathBuf::from(file),
        actual_column: actual_column.to_string(),
        predicted_column: predicted_column.to_string(),
    }
}

/// Forecast files produced by the modelling pipeline
pub fn default_series_sources() -> Vec<SeriesSource> {
    let ndvi = |days: u32| {
        series(
            &format!("ndvi_t{}", days),
            Phenomenon::Ndvi,
            days,
            &format!("NDVI_predictions_NDVI_t+{}.csv", days),
            "Actual NDVI",
            "Predicted NDVI",
        )
    };
    let wind = |name: &str, phenomenon: Phenomenon, prefix: &str, days: u32| {
        series(
            &format!("{}_t{}", name, days),
            phenomenon,
            days,
            &format!("Wind_{}_t+{}_forecast.csv", prefix, days),
            "Actual",
            "Predicted",
        )
    };

    vec![
        ndvi(1),
        ndvi(7),
        ndvi(16),
        ndvi(30),
        wind("wind_speed", Phenomenon::WindSpeed, "WindSpeed", 1),
        wind("wind_speed", Phenomenon::WindSpeed, "WindSpeed", 3),
        wind("wind_dir", Phenomenon::WindDirection, "WindDir", 1),
        wind("wind_dir", Phenomenon::WindDirection, "WindDir", 7),
    ]
}

pub fn default_metrics_sources() -> Vec<MetricsSource> {
    vec![
        MetricsSource {
            name: "NDVI".to_string(),
            phenomenon: Phenomenon::Ndvi,
            file: PathBuf::from("NDVI_forecast_metrics.csv"),
        },
        MetricsSource {
            name: "Wind".to_string(),
            phenomenon: Phenomenon::WindSpeed,
            file: PathBuf::from("Wind_forecast_metrics.csv"),
        },
    ]
}
