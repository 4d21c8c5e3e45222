//! Advisory rule evaluator
//!
//! Maps a single reading to the advisories that apply to it. Rules are
//! independent and checked in a fixed order, so the output is deterministic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EnvironmentalReading;

/// Vegetation stress below this NDVI (0.3)
pub const NDVI_STRESS_THRESHOLD: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

/// Low rainfall below this many millimeters (2)
pub const LOW_RAINFALL_THRESHOLD_MM: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// High wind above this speed (12)
pub const HIGH_WIND_THRESHOLD: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Condition detected for a reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvisoryKind {
    VegetationStress,
    LowRainfall,
    HighWind,
    /// Fallback when no other rule fires
    Stable,
}

impl AdvisoryKind {
    pub const ALL: [AdvisoryKind; 4] = [
        AdvisoryKind::VegetationStress,
        AdvisoryKind::LowRainfall,
        AdvisoryKind::HighWind,
        AdvisoryKind::Stable,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            AdvisoryKind::VegetationStress => "VEGETATION_STRESS",
            AdvisoryKind::LowRainfall => "LOW_RAINFALL",
            AdvisoryKind::HighWind => "HIGH_WIND",
            AdvisoryKind::Stable => "STABLE",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            AdvisoryKind::VegetationStress => "Vegetation stress detected; consider irrigation",
            AdvisoryKind::LowRainfall => "Low rainfall; monitor soil moisture",
            AdvisoryKind::HighWind => "High wind alert; delay pesticide spraying",
            AdvisoryKind::Stable => "Conditions stable; no immediate action needed",
        }
    }
}

impl std::fmt::Display for AdvisoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// An advisory tag with its human-readable recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdvisoryMessage {
    pub kind: AdvisoryKind,
    pub text: String,
}

impl From<AdvisoryKind> for AdvisoryMessage {
    fn from(kind: AdvisoryKind) -> Self {
        Self {
            kind,
            text: kind.text().to_string(),
        }
    }
}

/// Evaluate a reading against the advisory rules.
///
/// Never returns an empty list: when no rule fires the result is exactly
/// `[Stable]`.
pub fn evaluate(reading: &EnvironmentalReading) -> Vec<AdvisoryMessage> {
    let mut advice = Vec::with_capacity(3);

    if reading.vegetation_index < NDVI_STRESS_THRESHOLD {
        advice.push(AdvisoryKind::VegetationStress.into());
    }
    if reading.rainfall_mm < LOW_RAINFALL_THRESHOLD_MM {
        advice.push(AdvisoryKind::LowRainfall.into());
    }
    if reading.wind_speed > HIGH_WIND_THRESHOLD {
        advice.push(AdvisoryKind::HighWind.into());
    }
    if advice.is_empty() {
        advice.push(AdvisoryKind::Stable.into());
    }

    advice
}

/// Kinds only, in evaluation order
pub fn evaluate_kinds(reading: &EnvironmentalReading) -> Vec<AdvisoryKind> {
    evaluate(reading).into_iter().map(|m| m.kind).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(ndvi: &str, rain: &str, wind: &str) -> EnvironmentalReading {
        EnvironmentalReading::new(ndvi.parse().unwrap(), rain.parse().unwrap(), wind.parse().unwrap())
    }

    #[test]
    fn thresholds_match_constants() {
        assert_eq!(NDVI_STRESS_THRESHOLD.to_string(), "0.3");
        assert_eq!(LOW_RAINFALL_THRESHOLD_MM.to_string(), "2");
        assert_eq!(HIGH_WIND_THRESHOLD.to_string(), "12");
    }

    #[test]
    fn calm_reading_is_stable() {
        let advice = evaluate(&reading("0.6", "10", "5"));
        assert_eq!(advice, vec![AdvisoryMessage::from(AdvisoryKind::Stable)]);
        assert_eq!(advice[0].text, "Conditions stable; no immediate action needed");
    }

    #[test]
    fn all_rules_fire_in_order() {
        assert_eq!(
            evaluate_kinds(&reading("0.1", "0.5", "15")),
            vec![
                AdvisoryKind::VegetationStress,
                AdvisoryKind::LowRainfall,
                AdvisoryKind::HighWind
            ]
        );
    }

    #[test]
    fn kind_serializes_as_code() {
        for kind in AdvisoryKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.code()));
        }
    }
}
