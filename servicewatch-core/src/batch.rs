//! Batch input loading and evaluation
//!
//! Accepts a single JSON object, a JSON array of objects, or JSON Lines.
//! Validation is per record: one bad record never aborts the batch.

use crate::error::ValidationError;
use crate::prediction::{PredictionResult, RiskModel};
use crate::telemetry::TelemetryInput;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::io::Read;
use std::path::Path;

/// A parsed record, or the reason it was rejected
pub type Record = std::result::Result<TelemetryInput, ValidationError>;

/// Parse a telemetry document into records, preserving input order
///
/// The document is read as a stream of JSON values, so a single object, an
/// array and newline-separated objects share one parser. Syntax errors keep
/// the position serde reports within the whole document.
pub fn parse_batch(content: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let stream = serde_json::Deserializer::from_str(content).into_iter::<serde_json::Value>();
    for value in stream {
        match value.context("failed to parse telemetry JSON")? {
            serde_json::Value::Array(items) => {
                records.extend(items.iter().map(TelemetryInput::from_json));
            }
            value => records.push(TelemetryInput::from_json(&value)),
        }
    }
    Ok(records)
}

/// Read and parse a telemetry file. `-` reads standard input.
pub fn load_batch(path: &Path) -> Result<Vec<Record>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read telemetry from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read telemetry file: {}", path.display()))?
    };

    parse_batch(&content).with_context(|| format!("invalid telemetry in: {}", path.display()))
}

/// Predict every record in parallel; output order matches input order
pub fn predict_batch(
    records: &[Record],
    model: &RiskModel,
) -> Vec<std::result::Result<PredictionResult, ValidationError>> {
    records
        .par_iter()
        .map(|record| match record {
            Ok(input) => model.predict(input),
            Err(e) => Err(e.clone()),
        })
        .collect()
}
