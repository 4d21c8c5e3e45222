//! WebAssembly module for the Green Flags dashboard
//!
//! Provides client-side computation for:
//! - Advisory evaluation of sensor readings
//! - Reading validation before submission

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn checked_reading(ndvi: f64, rainfall_mm: f64, wind_speed: f64) -> Result<EnvironmentalReading, String> {
    let reading = EnvironmentalReading::from_f64(ndvi, rainfall_mm, wind_speed).map_err(|e| e.to_string())?;
    validate_reading(&reading).map_err(str::to_string)?;
    Ok(reading)
}

fn reject(message: String) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// Evaluate a reading and return the advisories as a JSON array
#[wasm_bindgen]
pub fn evaluate_reading(ndvi: f64, rainfall_mm: f64, wind_speed: f64) -> Result<String, JsValue> {
    let reading = checked_reading(ndvi, rainfall_mm, wind_speed).map_err(reject)?;
    serde_json::to_string(&evaluate(&reading))
        .map_err(|e| JsValue::from_str(&format!("Failed to encode advisories: {}", e)))
}

/// Advisory texts only, in evaluation order
#[wasm_bindgen]
pub fn advisory_texts(ndvi: f64, rainfall_mm: f64, wind_speed: f64) -> Result<js_sys::Array, JsValue> {
    let reading = checked_reading(ndvi, rainfall_mm, wind_speed).map_err(reject)?;
    Ok(evaluate(&reading)
        .into_iter()
        .map(|m| JsValue::from_str(&m.text))
        .collect())
}

/// True when no advisory rule fires
#[wasm_bindgen]
pub fn is_stable(ndvi: f64, rainfall_mm: f64, wind_speed: f64) -> bool {
    checked_reading(ndvi, rainfall_mm, wind_speed)
        .map(|reading| evaluate_kinds(&reading) == [AdvisoryKind::Stable])
        .unwrap_or(false)
}

/// Every advisory code the evaluator can emit
#[wasm_bindgen]
pub fn advisory_kind_codes() -> js_sys::Array {
    AdvisoryKind::ALL
        .iter()
        .map(|kind| JsValue::from_str(kind.code()))
        .collect()
}

/// Check a reading without evaluating it; returns the first problem found
#[wasm_bindgen]
pub fn reading_error(ndvi: f64, rainfall_mm: f64, wind_speed: f64) -> Option<String> {
    checked_reading(ndvi, rainfall_mm, wind_speed).err()
}
