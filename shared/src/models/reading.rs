//! Environmental reading models

use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An immutable snapshot of field conditions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EnvironmentalReading {
    /// NDVI, conventionally in [-1, 1]
    pub vegetation_index: Decimal,
    /// Rainfall in millimeters
    pub rainfall_mm: Decimal,
    /// Wind speed in km/h
    pub wind_speed: Decimal,
}

/// Errors converting raw sensor values into a reading
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReadingError {
    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} cannot be represented as a decimal")]
    Unrepresentable { field: &'static str },
}

impl EnvironmentalReading {
    pub fn new(vegetation_index: Decimal, rainfall_mm: Decimal, wind_speed: Decimal) -> Self {
        Self {
            vegetation_index,
            rainfall_mm,
            wind_speed,
        }
    }

    /// Build a reading from floating point sensor values.
    ///
    /// NaN and infinities are rejected. Range checks are left to
    /// [`crate::validate_reading`].
    pub fn from_f64(
        vegetation_index: f64,
        rainfall_mm: f64,
        wind_speed: f64,
    ) -> Result<Self, ReadingError> {
        Ok(Self {
            vegetation_index: to_decimal("vegetation_index", vegetation_index)?,
            rainfall_mm: to_decimal("rainfall_mm", rainfall_mm)?,
            wind_speed: to_decimal("wind_speed", wind_speed)?,
        })
    }
}

fn to_decimal(field: &'static str, value: f64) -> Result<Decimal, ReadingError> {
    if !value.is_finite() {
        return Err(ReadingError::NotFinite { field });
    }
    Decimal::from_f64(value).ok_or(ReadingError::Unrepresentable { field })
}

/// A timestamped reading as shown in the sensor table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub reading: EnvironmentalReading,
}

impl SensorRecord {
    pub fn new(timestamp: DateTime<Utc>, reading: EnvironmentalReading) -> Self {
        Self { timestamp, reading }
    }

    /// Record stamped with the current time
    pub fn now(reading: EnvironmentalReading) -> Self {
        Self::new(Utc::now(), reading)
    }
}
