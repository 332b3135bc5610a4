//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Output order matches input record order
//! - Byte-for-byte identical output across runs

use crate::error::{InvalidField, ValidationError};
use crate::prediction::PredictionResult;
use crate::risk::FeatureContribution;
use anyhow::{Context, Result};
use serde::Serialize;

/// Outcome for one input record
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Prediction(PredictionResult),
    /// Same body shape as a rejected request: `{"error": "..."}`
    Error {
        error: String,
        /// Per-field reasons, shown in text output only
        #[serde(skip)]
        fields: Vec<InvalidField>,
    },
}

/// One record's outcome, tagged with its position in the input
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub index: usize,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl BatchEntry {
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error { .. })
    }
}

/// Pair results with their input positions
pub fn build_entries(
    results: Vec<std::result::Result<PredictionResult, ValidationError>>,
) -> Vec<BatchEntry> {
    results
        .into_iter()
        .enumerate()
        .map(|(index, result)| BatchEntry {
            index,
            outcome: match result {
                Ok(prediction) => Outcome::Prediction(prediction),
                Err(e) => Outcome::Error {
                    error: e.to_string(),
                    fields: e.fields().to_vec(),
                },
            },
        })
        .collect()
}

/// Render entries as a pretty JSON array
pub fn render_json(entries: &[BatchEntry]) -> Result<String> {
    serde_json::to_string_pretty(entries).context("failed to serialize predictions")
}

/// Render entries as JSON Lines
pub fn render_jsonl(entries: &[BatchEntry]) -> Result<String> {
    let mut output = String::new();
    for entry in entries {
        let line = serde_json::to_string(entry)
            .with_context(|| format!("failed to serialize prediction {}", entry.index))?;
        output.push_str(&line);
        output.push('\n');
    }
    Ok(output)
}

/// Render entries as a text table with indented details
pub fn render_text(entries: &[BatchEntry]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<6} {:<12} {:<8} {:<11} {:<8} {}\n",
        "#", "PROBABILITY", "LEVEL", "CONFIDENCE", "FACTORS", "CLASS"
    ));

    for entry in entries {
        match &entry.outcome {
            Outcome::Prediction(p) => {
                output.push_str(&format!(
                    "{:<6} {:<12} {:<8} {:<11} {:<8} {}\n",
                    entry.index,
                    format!("{:.2}", p.probability),
                    p.risk_level.as_str(),
                    format!("{}%", p.confidence),
                    p.risk_factors.len(),
                    if p.classification == 1 {
                        "failure-likely"
                    } else {
                        "ok"
                    },
                ));
                for factor in &p.risk_factors {
                    output.push_str(&format!("       ! {}\n", factor));
                }
                for rec in &p.recommendations {
                    output.push_str(&format!("       > {}\n", rec));
                }
            }
            Outcome::Error { error, fields } => {
                output.push_str(&format!("{:<6} error: {}\n", entry.index, error));
                for field in fields {
                    output.push_str(&format!(
                        "       ? {}: {}\n",
                        field.field,
                        field.issue.as_str()
                    ));
                }
            }
        }
    }

    output
}

/// Render the per-feature score breakdown
pub fn render_explanation(contributions: &[FeatureContribution]) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<26} {:>12} {:<5} {:>6} {:>6} {:>8}\n",
        "FEATURE", "VALUE", "UNIT", "RISK", "WEIGHT", "WEIGHTED"
    ));
    for c in contributions {
        output.push_str(&format!(
            "{:<26} {:>12.2} {:<5} {:>6.3} {:>6.2} {:>8.4}\n",
            c.feature.as_str(),
            c.value,
            c.feature.unit(),
            c.risk,
            c.weight,
            c.weighted_risk
        ));
    }
    output
}
