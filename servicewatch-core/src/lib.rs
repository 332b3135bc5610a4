//! ServiceWatch core library - failure-risk scoring for vehicle telemetry

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Scoring is a pure function of one telemetry record and the tables
// - No global mutable state; tables are immutable once built
// - No randomness, clocks, or I/O in the scoring path
// - Identical input yields byte-for-byte identical output

pub mod batch;
pub mod config;
pub mod error;
pub mod factors;
pub mod prediction;
pub mod recommendations;
pub mod report;
pub mod risk;
pub mod tables;
pub mod telemetry;

pub use config::ResolvedConfig;
pub use error::ValidationError;
pub use factors::detect_risk_factors;
pub use prediction::{predict_failure, PredictionResult, RiskModel};
pub use recommendations::generate_recommendations;
pub use report::{render_json, render_jsonl, render_text, BatchEntry};
pub use risk::{calculate_feature_risk, RiskLevel};
pub use telemetry::{Feature, TelemetryInput};
