//! Telemetry input model
//!
//! Fourteen required numeric readings per vehicle. Every field must be
//! present and finite; there are no defaults.

use crate::error::{FieldIssue, InvalidField, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of telemetry features
pub const FEATURE_COUNT: usize = 14;

/// A single telemetry feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    EngineTemp,
    OilPressure,
    CoolantTemp,
    BrakePadThickness,
    BatteryVoltage,
    TirePressureFl,
    TirePressureFr,
    TirePressureRl,
    TirePressureRr,
    TransmissionFluidLevel,
    SuspensionWear,
    Odometer,
    FuelEfficiency,
    VibrationLevel,
}

impl Feature {
    /// Canonical order. Scoring, validation and reports all iterate this.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::EngineTemp,
        Feature::OilPressure,
        Feature::CoolantTemp,
        Feature::BrakePadThickness,
        Feature::BatteryVoltage,
        Feature::TirePressureFl,
        Feature::TirePressureFr,
        Feature::TirePressureRl,
        Feature::TirePressureRr,
        Feature::TransmissionFluidLevel,
        Feature::SuspensionWear,
        Feature::Odometer,
        Feature::FuelEfficiency,
        Feature::VibrationLevel,
    ];

    pub const TIRES: [Feature; 4] = [
        Feature::TirePressureFl,
        Feature::TirePressureFr,
        Feature::TirePressureRl,
        Feature::TirePressureRr,
    ];

    /// Position in `Feature::ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::EngineTemp => "engine_temp",
            Feature::OilPressure => "oil_pressure",
            Feature::CoolantTemp => "coolant_temp",
            Feature::BrakePadThickness => "brake_pad_thickness",
            Feature::BatteryVoltage => "battery_voltage",
            Feature::TirePressureFl => "tire_pressure_fl",
            Feature::TirePressureFr => "tire_pressure_fr",
            Feature::TirePressureRl => "tire_pressure_rl",
            Feature::TirePressureRr => "tire_pressure_rr",
            Feature::TransmissionFluidLevel => "transmission_fluid_level",
            Feature::SuspensionWear => "suspension_wear",
            Feature::Odometer => "odometer",
            Feature::FuelEfficiency => "fuel_efficiency",
            Feature::VibrationLevel => "vibration_level",
        }
    }

    /// Measurement unit, for display only
    pub fn unit(&self) -> &'static str {
        match self {
            Feature::EngineTemp | Feature::CoolantTemp => "°C",
            Feature::OilPressure
            | Feature::TirePressureFl
            | Feature::TirePressureFr
            | Feature::TirePressureRl
            | Feature::TirePressureRr => "PSI",
            Feature::BrakePadThickness => "mm",
            Feature::BatteryVoltage => "V",
            Feature::TransmissionFluidLevel | Feature::SuspensionWear => "%",
            Feature::Odometer => "km",
            Feature::FuelEfficiency => "km/L",
            Feature::VibrationLevel => "g",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown telemetry feature: {}", s))
    }
}

/// One vehicle's telemetry reading set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetryInput {
    /// °C
    pub engine_temp: f64,
    /// PSI
    pub oil_pressure: f64,
    /// °C
    pub coolant_temp: f64,
    /// mm
    pub brake_pad_thickness: f64,
    /// V
    pub battery_voltage: f64,
    pub tire_pressure_fl: f64,
    pub tire_pressure_fr: f64,
    pub tire_pressure_rl: f64,
    pub tire_pressure_rr: f64,
    /// %
    pub transmission_fluid_level: f64,
    /// %
    pub suspension_wear: f64,
    /// km
    pub odometer: f64,
    /// km/L
    pub fuel_efficiency: f64,
    /// g
    pub vibration_level: f64,
}

impl TelemetryInput {
    /// Read a single feature
    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::EngineTemp => self.engine_temp,
            Feature::OilPressure => self.oil_pressure,
            Feature::CoolantTemp => self.coolant_temp,
            Feature::BrakePadThickness => self.brake_pad_thickness,
            Feature::BatteryVoltage => self.battery_voltage,
            Feature::TirePressureFl => self.tire_pressure_fl,
            Feature::TirePressureFr => self.tire_pressure_fr,
            Feature::TirePressureRl => self.tire_pressure_rl,
            Feature::TirePressureRr => self.tire_pressure_rr,
            Feature::TransmissionFluidLevel => self.transmission_fluid_level,
            Feature::SuspensionWear => self.suspension_wear,
            Feature::Odometer => self.odometer,
            Feature::FuelEfficiency => self.fuel_efficiency,
            Feature::VibrationLevel => self.vibration_level,
        }
    }

    fn slot_mut(&mut self, feature: Feature) -> &mut f64 {
        match feature {
            Feature::EngineTemp => &mut self.engine_temp,
            Feature::OilPressure => &mut self.oil_pressure,
            Feature::CoolantTemp => &mut self.coolant_temp,
            Feature::BrakePadThickness => &mut self.brake_pad_thickness,
            Feature::BatteryVoltage => &mut self.battery_voltage,
            Feature::TirePressureFl => &mut self.tire_pressure_fl,
            Feature::TirePressureFr => &mut self.tire_pressure_fr,
            Feature::TirePressureRl => &mut self.tire_pressure_rl,
            Feature::TirePressureRr => &mut self.tire_pressure_rr,
            Feature::TransmissionFluidLevel => &mut self.transmission_fluid_level,
            Feature::SuspensionWear => &mut self.suspension_wear,
            Feature::Odometer => &mut self.odometer,
            Feature::FuelEfficiency => &mut self.fuel_efficiency,
            Feature::VibrationLevel => &mut self.vibration_level,
        }
    }

    /// Copy with one feature replaced
    pub fn with_value(mut self, feature: Feature, value: f64) -> Self {
        *self.slot_mut(feature) = value;
        self
    }

    /// Front-left, front-right, rear-left, rear-right
    pub fn tire_pressures(&self) -> [f64; 4] {
        Feature::TIRES.map(|f| self.value(f))
    }

    /// Build from an untyped JSON object, reporting every bad field.
    ///
    /// Unknown keys are ignored. A value must be a JSON number; numeric
    /// strings are rejected.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ValidationError> {
        let object = value.as_object();
        let mut input = TelemetryInput::zeroed();
        let mut invalid = Vec::new();

        for feature in Feature::ALL {
            let raw = object.and_then(|o| o.get(feature.as_str()));
            let issue = match raw {
                None | Some(serde_json::Value::Null) => Some(FieldIssue::Missing),
                Some(v) => match v.as_f64() {
                    None => Some(FieldIssue::NotANumber),
                    Some(n) if !n.is_finite() => Some(FieldIssue::NotFinite),
                    Some(n) => {
                        *input.slot_mut(feature) = n;
                        None
                    }
                },
            };
            if let Some(issue) = issue {
                invalid.push(InvalidField {
                    field: feature.as_str(),
                    issue,
                });
            }
        }

        if invalid.is_empty() {
            Ok(input)
        } else {
            Err(ValidationError::new(invalid))
        }
    }

    /// Reject non-finite readings on a directly constructed record
    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid: Vec<InvalidField> = Feature::ALL
            .iter()
            .filter(|f| !self.value(**f).is_finite())
            .map(|f| InvalidField {
                field: f.as_str(),
                issue: FieldIssue::NotFinite,
            })
            .collect();

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(invalid))
        }
    }

    fn zeroed() -> Self {
        TelemetryInput {
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
        }
    }
}
