//! Simulated sensor feed
//!
//! A [`ReadingSource`] produces readings, a bounded [`SensorLog`] keeps the
//! recent ones for display, and [`SimulationService`] drives timed runs.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{EnvironmentalReading, SensorRecord, ValueRange};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::config::{SamplingRanges, SimulationConfig};
use crate::error::{AppError, AppResult};
use crate::services::dashboard::{self, SimulationView};

/// Producer of environmental readings
pub trait ReadingSource: Send {
    fn next_reading(&mut self) -> EnvironmentalReading;
}

/// Draws each field independently from a uniform distribution
pub struct UniformReadingSource {
    ranges: SamplingRanges,
    rng: StdRng,
}

impl UniformReadingSource {
    pub fn new(ranges: SamplingRanges) -> Self {
        Self {
            ranges,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible source for tests and demos
    pub fn with_seed(ranges: SamplingRanges, seed: u64) -> Self {
        Self {
            ranges,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn sample(&mut self, range: ValueRange, decimals: u32) -> Decimal {
        let value = if range.min < range.max {
            self.rng.gen_range(range.min..=range.max)
        } else {
            range.min
        };
        Decimal::from_f64(value)
            .unwrap_or(Decimal::ZERO)
            .round_dp(decimals)
    }
}

impl ReadingSource for UniformReadingSource {
    fn next_reading(&mut self) -> EnvironmentalReading {
        let ranges = self.ranges;
        EnvironmentalReading {
            vegetation_index: self.sample(ranges.vegetation_index, 3),
            rainfall_mm: self.sample(ranges.rainfall_mm, 2),
            wind_speed: self.sample(ranges.wind_speed, 2),
        }
    }
}

/// Bounded log of recent sensor records, oldest evicted first
#[derive(Debug, Clone)]
pub struct SensorLog {
    capacity: usize,
    records: VecDeque<SensorRecord>,
}

impl SensorLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, record: SensorRecord) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Up to `n` records, newest first
    pub fn latest(&self, n: usize) -> Vec<SensorRecord> {
        self.records.iter().rev().take(n).cloned().collect()
    }

    pub fn last(&self) -> Option<&SensorRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Parameters for one simulation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSettings {
    pub iterations: u32,
    pub interval: Duration,
}

impl From<&SimulationConfig> for RunSettings {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            iterations: config.iterations,
            interval: Duration::from_millis(config.interval_ms),
        }
    }
}

/// Simulation run state
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SimulationStatus {
    Idle,
    Running {
        run_id: Uuid,
        completed: u32,
        total: u32,
    },
    Completed {
        run_id: Uuid,
        total: u32,
    },
}

impl SimulationStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, SimulationStatus::Running { .. })
    }
}

/// Simulation service owning the sensor log and the reading source
#[derive(Clone)]
pub struct SimulationService {
    log: Arc<RwLock<SensorLog>>,
    source: Arc<Mutex<Box<dyn ReadingSource>>>,
    status: Arc<RwLock<SimulationStatus>>,
    defaults: RunSettings,
    display_rows: usize,
}

impl SimulationService {
    pub fn new(config: &SimulationConfig) -> Self {
        Self::with_source(config, Box::new(UniformReadingSource::new(config.ranges)))
    }

    pub fn with_source(config: &SimulationConfig, source: Box<dyn ReadingSource>) -> Self {
        Self {
            log: Arc::new(RwLock::new(SensorLog::new(config.log_capacity))),
            source: Arc::new(Mutex::new(source)),
            status: Arc::new(RwLock::new(SimulationStatus::Idle)),
            defaults: RunSettings::from(config),
            display_rows: config.display_rows,
        }
    }

    pub fn defaults(&self) -> RunSettings {
        self.defaults
    }

    pub async fn status(&self) -> SimulationStatus {
        self.status.read().await.clone()
    }

    /// Take one reading now and append it to the log
    pub async fn step(&self) -> SensorRecord {
        let reading = self.source.lock().await.next_reading();
        let record = SensorRecord::now(reading);
        self.log.write().await.push(record.clone());

        tracing::debug!(
            ndvi = %reading.vegetation_index,
            rainfall_mm = %reading.rainfall_mm,
            wind_speed = %reading.wind_speed,
            "Sensor reading recorded"
        );
        record
    }

    /// Start a background run; fails while another run is active
    pub async fn start(&self, settings: RunSettings) -> AppResult<Uuid> {
        let run_id = Uuid::new_v4();
        {
            let mut status = self.status.write().await;
            if status.is_running() {
                return Err(AppError::Conflict(
                    "A simulation run is already in progress".to_string(),
                ));
            }
            *status = SimulationStatus::Running {
                run_id,
                completed: 0,
                total: settings.iterations,
            };
        }

        tracing::info!(
            %run_id,
            iterations = settings.iterations,
            interval_ms = settings.interval.as_millis() as u64,
            "Starting sensor simulation"
        );

        let service = self.clone();
        tokio::spawn(async move {
            service.run(run_id, settings).await;
        });

        Ok(run_id)
    }

    async fn run(&self, run_id: Uuid, settings: RunSettings) {
        for i in 0..settings.iterations {
            self.step().await;
            *self.status.write().await = SimulationStatus::Running {
                run_id,
                completed: i + 1,
                total: settings.iterations,
            };

            if i + 1 < settings.iterations && !settings.interval.is_zero() {
                tokio::time::sleep(settings.interval).await;
            }
        }

        *self.status.write().await = SimulationStatus::Completed {
            run_id,
            total: settings.iterations,
        };
        tracing::info!(%run_id, "Simulation complete");
    }

    /// Drop all logged records; refused during a run
    pub async fn clear(&self) -> AppResult<()> {
        let mut status = self.status.write().await;
        if status.is_running() {
            return Err(AppError::Conflict(
                "Cannot clear the sensor log during a simulation run".to_string(),
            ));
        }
        let mut log = self.log.write().await;
        if !log.is_empty() {
            tracing::info!(records = log.len(), "Sensor log cleared");
            log.clear();
        }
        *status = SimulationStatus::Idle;
        Ok(())
    }

    /// Render the current simulation view
    pub async fn view(&self) -> SimulationView {
        let status = self.status().await;
        let log = self.log.read().await;
        dashboard::render_simulation(status, &log, self.display_rows)
    }

    pub async fn log_len(&self) -> usize {
        self.log.read().await.len()
    }
}
