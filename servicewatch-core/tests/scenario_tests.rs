//! End-to-end prediction scenarios against the shipped tables

use servicewatch_core::batch::{load_batch, predict_batch};
use servicewatch_core::config::load_and_resolve;
use servicewatch_core::report::build_entries;
use servicewatch_core::risk::{amplify, weighted_probability};
use servicewatch_core::{
    predict_failure, render_json, Feature, RiskLevel, RiskModel, TelemetryInput,
};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_single(name: &str) -> TelemetryInput {
    let records = load_batch(&fixture_path(name)).unwrap();
    assert_eq!(records.len(), 1);
    records.into_iter().next().unwrap().unwrap()
}

#[test]
fn test_all_optimal_vehicle() {
    let input = load_single("telemetry/optimal.json");
    let result = predict_failure(&input).unwrap();

    assert!(result.risk_factors.is_empty());
    assert!(result.probability >= 0.01 && result.probability <= 0.05);
    assert_eq!(result.classification, 0);
    assert_eq!(result.risk_level, RiskLevel::Low);
    assert_eq!(
        result.recommendations,
        vec!["Vehicle is in good condition. Continue regular maintenance."]
    );
}

#[test]
fn test_all_critical_vehicle() {
    let input = load_single("telemetry/critical.json");
    let result = predict_failure(&input).unwrap();

    // Every feature saturates, then both interaction steps fire
    assert_eq!(result.probability, 0.98);
    assert_eq!(result.classification, 1);
    assert_eq!(result.confidence, 96);
    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(
        result.risk_factors,
        vec![
            "Tire pressure needs attention",
            "Engine temperature is outside optimal range",
            "Oil pressure is abnormal",
            "Coolant temperature is concerning",
            "Brake pads are worn",
            "Battery voltage is low",
            "Transmission fluid is low",
            "Suspension shows significant wear",
            "High vibration detected",
            "Fuel efficiency has decreased",
            "High mileage vehicle requires more frequent checks",
        ]
    );
    assert_eq!(
        result.recommendations,
        vec![
            "Schedule immediate vehicle inspection",
            "Inspect and replace brake pads if necessary",
            "Test battery and charging system",
            "Check and adjust tire pressure",
            "Run engine diagnostics",
            "Check wheel balance and alignment",
            "Check transmission fluid and consider service",
            "Inspect suspension components",
        ]
    );
}

#[test]
fn test_uneven_tire_pressure() {
    let input = load_single("telemetry/optimal.json")
        .with_value(Feature::TirePressureFl, 36.0)
        .with_value(Feature::TirePressureFr, 36.0)
        .with_value(Feature::TirePressureRl, 30.0)
        .with_value(Feature::TirePressureRr, 30.0);
    let result = predict_failure(&input).unwrap();

    assert_eq!(result.risk_factors, vec!["Uneven tire pressure detected"]);
    // Rear tires at half risk: 0.05 ^ 0.8 ≈ 0.091
    assert_eq!(result.probability, 0.09);
    assert_eq!(result.confidence, 82);
    assert_eq!(result.risk_level, RiskLevel::Low);
    // Only a capitalised "Tire" triggers the tire recommendation
    assert_eq!(
        result.recommendations,
        vec!["Vehicle is in good condition. Continue regular maintenance."]
    );
}

#[test]
fn test_brake_pad_boundary_exactness() {
    let base = load_single("telemetry/optimal.json");

    let at_limit = predict_failure(&base.with_value(Feature::BrakePadThickness, 4.0)).unwrap();
    assert!(!at_limit.risk_factors.iter().any(|f| f == "Brake pads are worn"));

    let worn = predict_failure(&base.with_value(Feature::BrakePadThickness, 3.999)).unwrap();
    assert!(worn.risk_factors.iter().any(|f| f == "Brake pads are worn"));
}

#[test]
fn test_four_factors_trigger_first_multiplier_only() {
    let input = load_single("telemetry/optimal.json")
        .with_value(Feature::BatteryVoltage, 12.3)
        .with_value(Feature::SuspensionWear, 51.0)
        .with_value(Feature::VibrationLevel, 3.1)
        .with_value(Feature::FuelEfficiency, 7.9);
    let result = predict_failure(&input).unwrap();
    assert_eq!(result.risk_factors.len(), 4);

    let model = RiskModel::default();
    let base = weighted_probability(&input, &model.weights, &model.ranges);
    let expected = amplify(base) * 1.2;
    assert!((model.final_probability(&input, &result.risk_factors) - expected).abs() < 1e-12);
    assert_eq!(result.probability, 0.17);
}

#[test]
fn test_fleet_batch_mixed_validity() {
    let records = load_batch(&fixture_path("telemetry/fleet.jsonl")).unwrap();
    assert_eq!(records.len(), 4);

    let entries = build_entries(predict_batch(&records, &RiskModel::default()));
    let json: serde_json::Value = serde_json::from_str(&render_json(&entries).unwrap()).unwrap();

    assert_eq!(json[0]["probability"], 0.01);
    assert_eq!(json[1]["probability"], 0.41);
    assert_eq!(json[1]["risk_level"], "medium");
    assert_eq!(
        json[2]["error"],
        "Missing or invalid field: engine_temp, odometer"
    );
    assert_eq!(json[3]["probability"], 0.98);
    assert_eq!(json[3]["classification"], 1);
    assert_eq!(
        entries.iter().filter(|e| e.is_error()).count(),
        1,
        "only the malformed record should fail"
    );
}

#[test]
fn test_config_override_changes_score_not_factors() {
    let input = load_single("telemetry/optimal.json").with_value(Feature::Odometer, 75_000.0);
    let shipped = predict_failure(&input).unwrap();

    let config_path = fixture_path("heavy-mileage.servicewatchrc.json");
    let resolved = load_and_resolve(config_path.parent().unwrap(), Some(&config_path)).unwrap();
    let custom = resolved.model.predict(&input).unwrap();

    assert_eq!(shipped.probability, 0.03);
    assert_eq!(custom.probability, 0.34);
    assert!(shipped.risk_factors.is_empty());
    assert_eq!(custom.risk_factors, shipped.risk_factors);
}

#[test]
fn test_deterministic_output() {
    let records = load_batch(&fixture_path("telemetry/fleet.jsonl")).unwrap();
    let model = RiskModel::default();
    let first = render_json(&build_entries(predict_batch(&records, &model))).unwrap();
    let second = render_json(&build_entries(predict_batch(&records, &model))).unwrap();
    assert_eq!(first, second, "Output should be byte-for-byte identical");
}
