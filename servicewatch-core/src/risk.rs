//! Failure probability calculation
//!
//! Global invariants enforced:
//! - Deterministic risk calculations
//! - Per-feature risk is monotonic in distance from the optimal band
//! - Final probability stays within [0.01, 0.99]

use crate::tables::{FeatureRange, RangeTable, WeightTable};
use crate::telemetry::{Feature, TelemetryInput};
use serde::{Deserialize, Serialize};

/// Exponent of the non-linear amplification step
pub const AMPLIFICATION_EXPONENT: f64 = 0.8;

/// Lower and upper clamp of the final probability
pub const PROBABILITY_FLOOR: f64 = 0.01;
pub const PROBABILITY_CEILING: f64 = 0.99;

/// Probability at or above which a vehicle is classified as failing
pub const CLASSIFICATION_THRESHOLD: f64 = 0.5;

/// Risk level classification
///
/// Uses its own thresholds (0.4 / 0.7), separate from the 0.5
/// classification threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,    // < 0.4
    Medium, // 0.4-0.7
    High,   // >= 0.7
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Risk contribution of one value against its range, in [0, 1]
///
/// Zero inside the optimal band, rising linearly to 1 at the critical
/// bound and clamped beyond it. A side with no width between optimal and
/// critical saturates to 1 as soon as the value leaves the band.
pub fn calculate_feature_risk(value: f64, range: &FeatureRange) -> f64 {
    if range.contains_optimal(value) {
        return 0.0;
    }

    let deviation = if value < range.optimal_min {
        let span = range.optimal_min - range.critical_low;
        if span <= 0.0 {
            return 1.0;
        }
        (range.optimal_min - value) / span
    } else {
        let span = range.critical_high - range.optimal_max;
        if span <= 0.0 {
            return 1.0;
        }
        (value - range.optimal_max) / span
    };

    deviation.clamp(0.0, 1.0)
}

/// One feature's share of the weighted score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureContribution {
    pub feature: Feature,
    pub value: f64,
    pub risk: f64,
    pub weight: f64,
    pub weighted_risk: f64,
}

/// Per-feature risk and weighted contribution, in canonical order
pub fn score_breakdown(
    input: &TelemetryInput,
    weights: &WeightTable,
    ranges: &RangeTable,
) -> Vec<FeatureContribution> {
    weights
        .iter()
        .map(|(feature, weight)| {
            let value = input.value(feature);
            let risk = calculate_feature_risk(value, ranges.get(feature));
            FeatureContribution {
                feature,
                value,
                risk,
                weight,
                weighted_risk: risk * weight,
            }
        })
        .collect()
}

/// Weighted mean of per-feature risks
///
/// The denominator is the sum of the weights actually iterated, so tables
/// that don't sum to 1 still yield a value in [0, 1]. A zero total weight
/// scores 0.
pub fn weighted_probability(
    input: &TelemetryInput,
    weights: &WeightTable,
    ranges: &RangeTable,
) -> f64 {
    let mut total_risk = 0.0;
    let mut total_weight = 0.0;

    for (feature, weight) in weights.iter() {
        let risk = calculate_feature_risk(input.value(feature), ranges.get(feature));
        total_risk += risk * weight;
        total_weight += weight;
    }

    if total_weight <= 0.0 {
        return 0.0;
    }
    total_risk / total_weight
}

/// Non-linear amplification: `p ^ 0.8`
pub fn amplify(probability: f64) -> f64 {
    probability.powf(AMPLIFICATION_EXPONENT)
}

/// Compound probability when many risk factors fire together
///
/// Both steps may apply, in order: more than 3 factors multiplies by 1.2
/// capped at 0.95, then more than 5 multiplies by 1.3 capped at 0.98.
pub fn apply_interaction_effects(probability: f64, factor_count: usize) -> f64 {
    let mut p = probability;
    if factor_count > 3 {
        p = (p * 1.2).min(0.95);
    }
    if factor_count > 5 {
        p = (p * 1.3).min(0.98);
    }
    p
}

pub fn clamp_probability(probability: f64) -> f64 {
    probability.clamp(PROBABILITY_FLOOR, PROBABILITY_CEILING)
}

/// Binary failure decision: 1 at or above 0.5
pub fn classify(probability: f64) -> u8 {
    if probability >= CLASSIFICATION_THRESHOLD {
        1
    } else {
        0
    }
}

/// Distance from maximal uncertainty, as an integer percent
pub fn confidence_percent(probability: f64) -> u8 {
    let confidence = ((probability - 0.5).abs() * 2.0 * 100.0).round();
    confidence.clamp(0.0, 100.0) as u8
}

/// Assign risk level from the final probability
pub fn assign_risk_level(probability: f64) -> RiskLevel {
    if probability < 0.4 {
        RiskLevel::Low
    } else if probability < 0.7 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Round to 2 decimal places
pub fn round_probability(probability: f64) -> f64 {
    (probability * 100.0).round() / 100.0
}
