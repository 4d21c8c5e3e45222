//! Tests for the advisory rule evaluator
//! Verifies threshold boundaries, rule ordering and the stable fallback

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{evaluate, evaluate_kinds, AdvisoryKind, EnvironmentalReading};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn reading(ndvi: &str, rain: &str, wind: &str) -> EnvironmentalReading {
    EnvironmentalReading::new(dec(ndvi), dec(rain), dec(wind))
}

// =============================================================================
// Threshold boundaries
// Thresholds are strict: NDVI < 0.3, rainfall < 2, wind > 12
// =============================================================================

mod boundaries {
    use super::*;

    #[test]
    fn vegetation_index_at_threshold_is_not_stressed() {
        let kinds = evaluate_kinds(&reading("0.3", "10", "5"));
        assert!(!kinds.contains(&AdvisoryKind::VegetationStress));
    }

    #[test]
    fn vegetation_index_just_below_threshold_is_stressed() {
        let kinds = evaluate_kinds(&reading("0.2999", "10", "5"));
        assert_eq!(kinds, vec![AdvisoryKind::VegetationStress]);
    }

    #[test]
    fn rainfall_at_threshold_is_not_low() {
        let kinds = evaluate_kinds(&reading("0.5", "2", "5"));
        assert!(!kinds.contains(&AdvisoryKind::LowRainfall));
    }

    #[test]
    fn rainfall_just_below_threshold_is_low() {
        let kinds = evaluate_kinds(&reading("0.5", "1.999", "5"));
        assert_eq!(kinds, vec![AdvisoryKind::LowRainfall]);
    }

    #[test]
    fn wind_at_threshold_is_not_high() {
        let kinds = evaluate_kinds(&reading("0.5", "10", "12"));
        assert!(!kinds.contains(&AdvisoryKind::HighWind));
    }

    #[test]
    fn wind_just_above_threshold_is_high() {
        let kinds = evaluate_kinds(&reading("0.5", "10", "12.001"));
        assert_eq!(kinds, vec![AdvisoryKind::HighWind]);
    }

    #[test]
    fn all_boundaries_together_are_stable() {
        let kinds = evaluate_kinds(&reading("0.3", "2", "12"));
        assert_eq!(kinds, vec![AdvisoryKind::Stable]);
    }
}

// =============================================================================
// Rule combinations
// =============================================================================

mod combinations {
    use super::*;

    #[test]
    fn every_rule_fires_in_fixed_order() {
        let advice = evaluate(&reading("0.1", "0.5", "15"));
        let kinds: Vec<AdvisoryKind> = advice.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AdvisoryKind::VegetationStress,
                AdvisoryKind::LowRainfall,
                AdvisoryKind::HighWind
            ]
        );
        assert!(!kinds.contains(&AdvisoryKind::Stable));
    }

    #[test]
    fn texts_match_kinds() {
        let advice = evaluate(&reading("0.1", "0.5", "15"));
        assert_eq!(advice[0].text, "Vegetation stress detected; consider irrigation");
        assert_eq!(advice[1].text, "Low rainfall; monitor soil moisture");
        assert_eq!(advice[2].text, "High wind alert; delay pesticide spraying");
    }

    #[test]
    fn stress_and_wind_skip_rainfall() {
        let kinds = evaluate_kinds(&reading("0.25", "8", "13"));
        assert_eq!(
            kinds,
            vec![AdvisoryKind::VegetationStress, AdvisoryKind::HighWind]
        );
    }

    #[test]
    fn out_of_range_values_pass_through() {
        // Range checks belong to the ingestion boundary, not the evaluator
        let kinds = evaluate_kinds(&reading("-5", "-1", "-1"));
        assert_eq!(
            kinds,
            vec![AdvisoryKind::VegetationStress, AdvisoryKind::LowRainfall]
        );
    }
}

// =============================================================================
// Properties
// =============================================================================

fn decimal_strategy(min: i64, max: i64, scale: u32) -> impl Strategy<Value = Decimal> {
    (min..=max).prop_map(move |n| Decimal::new(n, scale))
}

fn any_reading_strategy() -> impl Strategy<Value = EnvironmentalReading> {
    (
        decimal_strategy(-1000, 1000, 3),
        decimal_strategy(0, 5000, 2),
        decimal_strategy(0, 3000, 2),
    )
        .prop_map(|(ndvi, rain, wind)| EnvironmentalReading::new(ndvi, rain, wind))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Readings clear of every threshold are exactly [Stable]
    #[test]
    fn prop_calm_readings_are_stable(
        ndvi in decimal_strategy(300, 1000, 3),
        rain in decimal_strategy(200, 5000, 2),
        wind in decimal_strategy(0, 1200, 2)
    ) {
        let kinds = evaluate_kinds(&EnvironmentalReading::new(ndvi, rain, wind));
        prop_assert_eq!(kinds, vec![AdvisoryKind::Stable]);
    }

    /// The evaluator never returns an empty list
    #[test]
    fn prop_never_empty(reading in any_reading_strategy()) {
        prop_assert!(!evaluate(&reading).is_empty());
    }

    /// Stable appears only alone
    #[test]
    fn prop_stable_is_exclusive(reading in any_reading_strategy()) {
        let kinds = evaluate_kinds(&reading);
        if kinds.contains(&AdvisoryKind::Stable) {
            prop_assert_eq!(kinds.len(), 1);
        }
    }

    /// Each rule fires exactly when its threshold is crossed
    #[test]
    fn prop_rules_match_thresholds(reading in any_reading_strategy()) {
        let kinds = evaluate_kinds(&reading);
        prop_assert_eq!(
            kinds.contains(&AdvisoryKind::VegetationStress),
            reading.vegetation_index < dec("0.3")
        );
        prop_assert_eq!(
            kinds.contains(&AdvisoryKind::LowRainfall),
            reading.rainfall_mm < dec("2")
        );
        prop_assert_eq!(
            kinds.contains(&AdvisoryKind::HighWind),
            reading.wind_speed > dec("12")
        );
    }

    /// Same reading, same answer
    #[test]
    fn prop_deterministic(reading in any_reading_strategy()) {
        prop_assert_eq!(evaluate(&reading), evaluate(&reading));
    }

    /// Output follows the fixed rule order
    #[test]
    fn prop_output_order(reading in any_reading_strategy()) {
        let positions: Vec<usize> = evaluate_kinds(&reading)
            .iter()
            .map(|k| AdvisoryKind::ALL.iter().position(|a| a == k).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
