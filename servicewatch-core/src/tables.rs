//! Static feature weight and range tables
//!
//! Configuration as data: the scorer reads these, never inline literals.
//! Defaults are `const` and immutable; overrides come from `config`.

use crate::telemetry::{Feature, FEATURE_COUNT};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Optimal band and critical bounds for one feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRange {
    pub optimal_min: f64,
    pub optimal_max: f64,
    pub critical_low: f64,
    pub critical_high: f64,
}

impl FeatureRange {
    pub const fn new(
        optimal_min: f64,
        optimal_max: f64,
        critical_low: f64,
        critical_high: f64,
    ) -> Self {
        FeatureRange {
            optimal_min,
            optimal_max,
            critical_low,
            critical_high,
        }
    }

    /// `critical_low < optimal_min <= optimal_max < critical_high`, all finite
    pub fn is_well_formed(&self) -> bool {
        [
            self.optimal_min,
            self.optimal_max,
            self.critical_low,
            self.critical_high,
        ]
        .iter()
        .all(|v| v.is_finite())
            && self.critical_low < self.optimal_min
            && self.optimal_min <= self.optimal_max
            && self.optimal_max < self.critical_high
    }

    /// Middle of the optimal band
    pub fn midpoint(&self) -> f64 {
        (self.optimal_min + self.optimal_max) / 2.0
    }

    pub fn contains_optimal(&self, value: f64) -> bool {
        value >= self.optimal_min && value <= self.optimal_max
    }
}

const TIRE_RANGE: FeatureRange = FeatureRange::new(32.0, 36.0, 28.0, 40.0);

/// Shipped ranges, in `Feature::ALL` order
pub const DEFAULT_RANGES: RangeTable = RangeTable([
    FeatureRange::new(85.0, 105.0, 70.0, 115.0),         // engine_temp
    FeatureRange::new(40.0, 60.0, 25.0, 80.0),           // oil_pressure
    FeatureRange::new(80.0, 100.0, 60.0, 110.0),         // coolant_temp
    FeatureRange::new(4.0, 12.0, 2.0, 15.0),             // brake_pad_thickness
    FeatureRange::new(12.4, 14.7, 11.5, 15.5),           // battery_voltage
    TIRE_RANGE,                                          // tire_pressure_fl
    TIRE_RANGE,                                          // tire_pressure_fr
    TIRE_RANGE,                                          // tire_pressure_rl
    TIRE_RANGE,                                          // tire_pressure_rr
    FeatureRange::new(60.0, 100.0, 40.0, 105.0),         // transmission_fluid_level
    FeatureRange::new(0.0, 30.0, -5.0, 70.0),            // suspension_wear
    FeatureRange::new(0.0, 50000.0, -1000.0, 150000.0),  // odometer
    FeatureRange::new(10.0, 20.0, 5.0, 30.0),            // fuel_efficiency
    FeatureRange::new(0.0, 2.0, -0.5, 5.0),              // vibration_level
]);

/// Shipped weights, in `Feature::ALL` order
pub const DEFAULT_WEIGHTS: WeightTable = WeightTable([
    0.12, // engine_temp
    0.10, // oil_pressure
    0.08, // coolant_temp
    0.11, // brake_pad_thickness
    0.09, // battery_voltage
    0.05, // tire_pressure_fl
    0.05, // tire_pressure_fr
    0.05, // tire_pressure_rl
    0.05, // tire_pressure_rr
    0.07, // transmission_fluid_level
    0.08, // suspension_wear
    0.06, // odometer
    0.04, // fuel_efficiency
    0.05, // vibration_level
]);

/// Per-feature range table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeTable([FeatureRange; FEATURE_COUNT]);

impl RangeTable {
    pub fn get(&self, feature: Feature) -> &FeatureRange {
        &self.0[feature.index()]
    }

    pub fn set(&mut self, feature: Feature, range: FeatureRange) {
        self.0[feature.index()] = range;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, &FeatureRange)> + '_ {
        Feature::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Check the ordering invariant for every entry
    pub fn validate(&self) -> Result<()> {
        for (feature, r) in self.iter() {
            if !r.is_well_formed() {
                anyhow::bail!(
                    "ranges.{} must satisfy critical_low < optimal_min <= optimal_max < critical_high \
                     (got critical_low={}, optimal_min={}, optimal_max={}, critical_high={})",
                    feature,
                    r.critical_low,
                    r.optimal_min,
                    r.optimal_max,
                    r.critical_high
                );
            }
        }
        Ok(())
    }
}

impl Default for RangeTable {
    fn default() -> Self {
        DEFAULT_RANGES
    }
}

/// Per-feature weight table. Weights need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightTable([f64; FEATURE_COUNT]);

impl WeightTable {
    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    pub fn set(&mut self, feature: Feature, weight: f64) {
        self.0[feature.index()] = weight;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Sum of all weights
    pub fn total(&self) -> f64 {
        self.iter().map(|(_, w)| w).sum()
    }

    /// Weights must be finite and non-negative, with a positive total
    pub fn validate(&self) -> Result<()> {
        for (feature, w) in self.iter() {
            if !w.is_finite() || w < 0.0 {
                anyhow::bail!("weights.{} must be non-negative (got {})", feature, w);
            }
        }
        if self.total() <= 0.0 {
            anyhow::bail!("weights must not all be zero");
        }
        Ok(())
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}
