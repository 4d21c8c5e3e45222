//! Validation utilities for readings entering the dashboard
//!
//! The advisory evaluator accepts any reading. These checks run at the
//! ingestion boundaries (HTTP, WASM) and reject physically meaningless input.

use rust_decimal::Decimal;

use crate::models::EnvironmentalReading;
use crate::types::ValueRange;

/// Validate NDVI is within [-1, 1]
pub fn validate_vegetation_index(ndvi: Decimal) -> Result<(), &'static str> {
    if ndvi < Decimal::NEGATIVE_ONE || ndvi > Decimal::ONE {
        return Err("Vegetation index must be between -1 and 1");
    }
    Ok(())
}

/// Validate rainfall is non-negative
pub fn validate_rainfall(rainfall_mm: Decimal) -> Result<(), &'static str> {
    if rainfall_mm < Decimal::ZERO {
        return Err("Rainfall cannot be negative");
    }
    Ok(())
}

/// Validate wind speed is non-negative
pub fn validate_wind_speed(wind_speed: Decimal) -> Result<(), &'static str> {
    if wind_speed < Decimal::ZERO {
        return Err("Wind speed cannot be negative");
    }
    Ok(())
}

/// Validate every field of a reading, reporting the first failure with its field name
pub fn validate_reading_fields(
    reading: &EnvironmentalReading,
) -> Result<(), (&'static str, &'static str)> {
    validate_vegetation_index(reading.vegetation_index).map_err(|e| ("vegetation_index", e))?;
    validate_rainfall(reading.rainfall_mm).map_err(|e| ("rainfall_mm", e))?;
    validate_wind_speed(reading.wind_speed).map_err(|e| ("wind_speed", e))?;
    Ok(())
}

/// Validate every field of a reading
pub fn validate_reading(reading: &EnvironmentalReading) -> Result<(), &'static str> {
    validate_reading_fields(reading).map_err(|(_, message)| message)
}

/// Validate a sampling range for the simulated reading source
pub fn validate_sampling_range(range: &ValueRange) -> Result<(), &'static str> {
    if !range.is_valid() {
        return Err("Sampling range must be finite with min <= max");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_vegetation_index_bounds() {
        assert!(validate_vegetation_index(dec("-1")).is_ok());
        assert!(validate_vegetation_index(dec("1")).is_ok());
        assert!(validate_vegetation_index(dec("0.45")).is_ok());
        assert!(validate_vegetation_index(dec("1.01")).is_err());
        assert!(validate_vegetation_index(dec("-1.5")).is_err());
    }

    #[test]
    fn test_negative_measurements_rejected() {
        assert!(validate_rainfall(dec("0")).is_ok());
        assert!(validate_rainfall(dec("-0.01")).is_err());
        assert!(validate_wind_speed(dec("0")).is_ok());
        assert!(validate_wind_speed(dec("-3")).is_err());
    }

    #[test]
    fn test_reading_reports_field() {
        let reading = EnvironmentalReading::new(dec("0.5"), dec("-1"), dec("4"));
        assert_eq!(
            validate_reading_fields(&reading),
            Err(("rainfall_mm", "Rainfall cannot be negative"))
        );
        assert_eq!(validate_reading(&reading), Err("Rainfall cannot be negative"));
    }

    #[test]
    fn test_sampling_range() {
        assert!(validate_sampling_range(&ValueRange::new(0.2, 0.9)).is_ok());
        assert!(validate_sampling_range(&ValueRange::new(0.9, 0.2)).is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Finite sensor values are accepted exactly when they are physically plausible
            #[test]
            fn prop_validation_matches_ranges(
                ndvi in -2.0f64..2.0,
                rain in -10.0f64..50.0,
                wind in -10.0f64..50.0
            ) {
                let reading = EnvironmentalReading::from_f64(ndvi, rain, wind).unwrap();
                let expected = (Decimal::NEGATIVE_ONE..=Decimal::ONE).contains(&reading.vegetation_index)
                    && reading.rainfall_mm >= Decimal::ZERO
                    && reading.wind_speed >= Decimal::ZERO;
                prop_assert_eq!(validate_reading(&reading).is_ok(), expected);
            }
        }
    }
}
