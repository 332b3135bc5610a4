//! Property tests for the scoring invariants
//!
//! Inputs are drawn per feature from a window twice as wide as its
//! critical range, so every branch (inside band, linear ramp, saturated)
//! is exercised.

use proptest::prelude::*;
use servicewatch_core::risk::{
    assign_risk_level, calculate_feature_risk, classify, weighted_probability,
};
use servicewatch_core::tables::DEFAULT_RANGES;
use servicewatch_core::{
    detect_risk_factors, predict_failure, Feature, RiskLevel, RiskModel, TelemetryInput,
};

fn midpoint_input() -> TelemetryInput {
    let mut input = TelemetryInput {
        engine_temp: 0.0,
        oil_pressure: 0.0,
        coolant_temp: 0.0,
        brake_pad_thickness: 0.0,
        battery_voltage: 0.0,
        tire_pressure_fl: 0.0,
        tire_pressure_fr: 0.0,
        tire_pressure_rl: 0.0,
        tire_pressure_rr: 0.0,
        transmission_fluid_level: 0.0,
        suspension_wear: 0.0,
        odometer: 0.0,
        fuel_efficiency: 0.0,
        vibration_level: 0.0,
    };
    for (feature, range) in DEFAULT_RANGES.iter() {
        input = input.with_value(feature, range.midpoint());
    }
    input
}

/// Map unit samples onto each feature's widened window
fn telemetry_from_unit(samples: [f64; 14]) -> TelemetryInput {
    let mut input = midpoint_input();
    for (feature, range) in DEFAULT_RANGES.iter() {
        let low = range.critical_low - (range.optimal_min - range.critical_low);
        let high = range.critical_high + (range.critical_high - range.optimal_max);
        let t = samples[feature.index()];
        input = input.with_value(feature, low + t * (high - low));
    }
    input
}

fn arb_telemetry() -> impl Strategy<Value = TelemetryInput> {
    proptest::array::uniform14(0.0f64..=1.0).prop_map(telemetry_from_unit)
}

fn arb_feature() -> impl Strategy<Value = Feature> {
    (0usize..14).prop_map(|i| Feature::ALL[i])
}

proptest! {
    #[test]
    fn prop_prediction_is_deterministic(input in arb_telemetry()) {
        let a = predict_failure(&input).unwrap();
        let b = predict_failure(&input).unwrap();
        prop_assert_eq!(a.probability.to_bits(), b.probability.to_bits());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_outputs_stay_in_range(input in arb_telemetry()) {
        let result = predict_failure(&input).unwrap();
        prop_assert!(result.probability >= 0.01 && result.probability <= 0.99);
        prop_assert!(result.confidence <= 100);
        prop_assert!(result.classification <= 1);
        prop_assert!(!result.recommendations.is_empty());
    }

    #[test]
    fn prop_classification_and_level_follow_probability(input in arb_telemetry()) {
        let model = RiskModel::default();
        let result = model.predict(&input).unwrap();
        let p = model.final_probability(&input, &result.risk_factors);

        prop_assert_eq!(result.classification == 1, p >= 0.5);
        prop_assert_eq!(result.classification, classify(p));

        let expected = if p < 0.4 {
            RiskLevel::Low
        } else if p < 0.7 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        };
        prop_assert_eq!(result.risk_level, expected);
        prop_assert_eq!(assign_risk_level(p), expected);
        prop_assert!((result.probability - (p * 100.0).round() / 100.0).abs() < 1e-12);
    }

    #[test]
    fn prop_feature_risk_is_bounded(value in -1.0e6f64..1.0e6, feature in arb_feature()) {
        let risk = calculate_feature_risk(value, DEFAULT_RANGES.get(feature));
        prop_assert!((0.0..=1.0).contains(&risk));
    }

    #[test]
    fn prop_feature_risk_monotonic_away_from_band(
        feature in arb_feature(),
        near in 0.0f64..2.0,
        extra in 0.0f64..2.0,
    ) {
        let range = DEFAULT_RANGES.get(feature);
        let base = midpoint_input();
        let below_span = range.optimal_min - range.critical_low;
        let above_span = range.critical_high - range.optimal_max;

        let contribution = |value: f64| {
            RiskModel::default()
                .explain(&base.with_value(feature, value))
                .into_iter()
                .find(|c| c.feature == feature)
                .map(|c| c.weighted_risk)
                .unwrap()
        };

        let low_near = contribution(range.optimal_min - near * below_span);
        let low_far = contribution(range.optimal_min - (near + extra) * below_span);
        prop_assert!(low_far >= low_near);

        let high_near = contribution(range.optimal_max + near * above_span);
        let high_far = contribution(range.optimal_max + (near + extra) * above_span);
        prop_assert!(high_far >= high_near);
    }

    #[test]
    fn prop_risk_factors_ignore_model_tables(input in arb_telemetry(), weight in 0.0f64..10.0) {
        let mut model = RiskModel::default();
        model.weights.set(Feature::EngineTemp, weight);
        let result = model.predict(&input).unwrap();
        prop_assert_eq!(result.risk_factors, detect_risk_factors(&input));
    }

    #[test]
    fn prop_optimal_band_scores_floor(samples in proptest::array::uniform14(0.0f64..=1.0)) {
        // Any reading inside every optimal band contributes zero risk
        let mut input = midpoint_input();
        for (feature, range) in DEFAULT_RANGES.iter() {
            let t = samples[feature.index()];
            let value = range.optimal_min + t * (range.optimal_max - range.optimal_min);
            input = input.with_value(feature, value.min(range.optimal_max));
        }
        let model = RiskModel::default();
        let base = weighted_probability(&input, &model.weights, &model.ranges);
        prop_assert_eq!(base, 0.0);
    }
}

#[test]
fn test_midpoint_input_is_factor_free() {
    let input = midpoint_input();
    assert!(detect_risk_factors(&input).is_empty());
    assert_eq!(predict_failure(&input).unwrap().probability, 0.01);
}
