//! Failure prediction
//!
//! Combines the weighted score, the rule-based risk factors and the
//! recommendation generator into a single result. Stateless: every call is
//! independent and identical input yields identical output.

use crate::error::ValidationError;
use crate::factors::detect_risk_factors;
use crate::recommendations::generate_recommendations;
use crate::risk::{self, FeatureContribution, RiskLevel};
use crate::tables::{RangeTable, WeightTable, DEFAULT_RANGES, DEFAULT_WEIGHTS};
use crate::telemetry::TelemetryInput;
use serde::{Deserialize, Serialize};

/// Weight and range tables used for scoring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskModel {
    pub weights: WeightTable,
    pub ranges: RangeTable,
}

impl Default for RiskModel {
    fn default() -> Self {
        RiskModel::SHIPPED
    }
}

/// Prediction output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// In [0.01, 0.99], rounded to 2 decimals
    pub probability: f64,
    /// 1 when the unrounded probability is at least 0.5
    pub classification: u8,
    /// Integer percent, 0-100
    pub confidence: u8,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<String>,
    /// Never empty
    pub recommendations: Vec<String>,
}

impl RiskModel {
    /// The shipped tables
    pub const SHIPPED: RiskModel = RiskModel {
        weights: DEFAULT_WEIGHTS,
        ranges: DEFAULT_RANGES,
    };

    /// Unrounded final probability, after amplification, interaction
    /// effects and clamping
    pub fn final_probability(&self, input: &TelemetryInput, risk_factors: &[String]) -> f64 {
        let base = risk::weighted_probability(input, &self.weights, &self.ranges);
        let amplified = risk::amplify(base);
        let compounded = risk::apply_interaction_effects(amplified, risk_factors.len());
        risk::clamp_probability(compounded)
    }

    /// Per-feature breakdown of the weighted score
    pub fn explain(&self, input: &TelemetryInput) -> Vec<FeatureContribution> {
        risk::score_breakdown(input, &self.weights, &self.ranges)
    }

    /// Predict failure risk for one vehicle
    pub fn predict(&self, input: &TelemetryInput) -> Result<PredictionResult, ValidationError> {
        input.validate()?;
        tracing::debug!(?input, "predicting failure");

        let risk_factors = detect_risk_factors(input);
        let probability = self.final_probability(input, &risk_factors);

        let classification = risk::classify(probability);
        let confidence = risk::confidence_percent(probability);
        let risk_level = risk::assign_risk_level(probability);
        let recommendations = generate_recommendations(&risk_factors, probability);

        tracing::debug!(
            probability,
            classification,
            confidence,
            risk_level = risk_level.as_str(),
            factors = risk_factors.len(),
            "prediction result"
        );

        Ok(PredictionResult {
            probability: risk::round_probability(probability),
            classification,
            confidence,
            risk_level,
            risk_factors,
            recommendations,
        })
    }
}

/// Predict failure risk with the shipped tables
pub fn predict_failure(input: &TelemetryInput) -> Result<PredictionResult, ValidationError> {
    RiskModel::SHIPPED.predict(input)
}
