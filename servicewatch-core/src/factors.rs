//! Rule-based risk factor detection
//!
//! Pure, stateless detection from raw telemetry. Independent of the
//! weighted score: thresholds here are literal trigger points and are not
//! derived from the range table.

use crate::telemetry::{Feature, TelemetryInput};

pub const TIRE_PRESSURE_ATTENTION: &str = "Tire pressure needs attention";
pub const UNEVEN_TIRE_PRESSURE: &str = "Uneven tire pressure detected";
pub const ENGINE_TEMPERATURE: &str = "Engine temperature is outside optimal range";
pub const OIL_PRESSURE: &str = "Oil pressure is abnormal";
pub const COOLANT_TEMPERATURE: &str = "Coolant temperature is concerning";
pub const BRAKE_PADS_WORN: &str = "Brake pads are worn";
pub const BATTERY_VOLTAGE_LOW: &str = "Battery voltage is low";
pub const TRANSMISSION_FLUID_LOW: &str = "Transmission fluid is low";
pub const SUSPENSION_WEAR: &str = "Suspension shows significant wear";
pub const HIGH_VIBRATION: &str = "High vibration detected";
pub const FUEL_EFFICIENCY_DROP: &str = "Fuel efficiency has decreased";
pub const HIGH_MILEAGE: &str = "High mileage vehicle requires more frequent checks";

/// Average tire pressure outside this band needs attention
const TIRE_AVERAGE_MIN: f64 = 30.0;
const TIRE_AVERAGE_MAX: f64 = 38.0;
/// Max minus min tire pressure above this is uneven
const TIRE_SPREAD_MAX: f64 = 5.0;
const HIGH_MILEAGE_KM: f64 = 100_000.0;

/// A single-feature trigger
struct FieldRule {
    feature: Feature,
    message: &'static str,
    is_risky: fn(f64) -> bool,
}

/// Evaluated in this order after the tire checks
const FIELD_RULES: [FieldRule; 9] = [
    FieldRule {
        feature: Feature::EngineTemp,
        message: ENGINE_TEMPERATURE,
        is_risky: |v| !(85.0..=105.0).contains(&v),
    },
    FieldRule {
        feature: Feature::OilPressure,
        message: OIL_PRESSURE,
        is_risky: |v| !(40.0..=60.0).contains(&v),
    },
    FieldRule {
        feature: Feature::CoolantTemp,
        message: COOLANT_TEMPERATURE,
        is_risky: |v| !(80.0..=100.0).contains(&v),
    },
    FieldRule {
        feature: Feature::BrakePadThickness,
        message: BRAKE_PADS_WORN,
        is_risky: |v| v < 4.0,
    },
    FieldRule {
        feature: Feature::BatteryVoltage,
        message: BATTERY_VOLTAGE_LOW,
        is_risky: |v| v < 12.4,
    },
    FieldRule {
        feature: Feature::TransmissionFluidLevel,
        message: TRANSMISSION_FLUID_LOW,
        is_risky: |v| v < 60.0,
    },
    FieldRule {
        feature: Feature::SuspensionWear,
        message: SUSPENSION_WEAR,
        is_risky: |v| v > 50.0,
    },
    FieldRule {
        feature: Feature::VibrationLevel,
        message: HIGH_VIBRATION,
        is_risky: |v| v > 3.0,
    },
    FieldRule {
        feature: Feature::FuelEfficiency,
        message: FUEL_EFFICIENCY_DROP,
        is_risky: |v| v < 8.0,
    },
];

/// Detect risk factors, in fixed rule order
///
/// Order: tire average, tire spread, the per-field rules, then mileage.
pub fn detect_risk_factors(input: &TelemetryInput) -> Vec<String> {
    let mut factors = Vec::new();

    let tires = input.tire_pressures();
    let average = tires.iter().sum::<f64>() / tires.len() as f64;
    if !(TIRE_AVERAGE_MIN..=TIRE_AVERAGE_MAX).contains(&average) {
        factors.push(TIRE_PRESSURE_ATTENTION.to_string());
    }

    let max = tires.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = tires.iter().copied().fold(f64::INFINITY, f64::min);
    if max - min > TIRE_SPREAD_MAX {
        factors.push(UNEVEN_TIRE_PRESSURE.to_string());
    }

    for rule in &FIELD_RULES {
        if (rule.is_risky)(input.value(rule.feature)) {
            factors.push(rule.message.to_string());
        }
    }

    if input.odometer > HIGH_MILEAGE_KM {
        factors.push(HIGH_MILEAGE.to_string());
    }

    factors
}
