//! Configuration file support for ServiceWatch
//!
//! Loads model overrides from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.servicewatchrc.json` in the working directory
//! 3. `servicewatch.config.json` in the working directory
//!
//! All fields are optional. Anything not overridden keeps the shipped value.

use crate::prediction::RiskModel;
use crate::tables::FeatureRange;
use crate::telemetry::Feature;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Upper bound for a single weight override
const MAX_WEIGHT: f64 = 10.0;

/// ServiceWatch configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceWatchConfig {
    /// Weight overrides keyed by feature name
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,

    /// Range overrides keyed by feature name
    #[serde(default)]
    pub ranges: BTreeMap<String, RangeOverride>,
}

/// Partial range override; unset bounds keep the shipped value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeOverride {
    pub optimal_min: Option<f64>,
    pub optimal_max: Option<f64>,
    pub critical_low: Option<f64>,
    pub critical_high: Option<f64>,
}

impl RangeOverride {
    fn apply(&self, base: &FeatureRange) -> FeatureRange {
        FeatureRange {
            optimal_min: self.optimal_min.unwrap_or(base.optimal_min),
            optimal_max: self.optimal_max.unwrap_or(base.optimal_max),
            critical_low: self.critical_low.unwrap_or(base.critical_low),
            critical_high: self.critical_high.unwrap_or(base.critical_high),
        }
    }
}

/// Resolved configuration, ready for scoring
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub model: RiskModel,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl ServiceWatchConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        for (name, &weight) in &self.weights {
            name.parse::<Feature>()
                .with_context(|| format!("invalid key in weights: {}", name))?;
            if !weight.is_finite() || weight < 0.0 {
                anyhow::bail!("weights.{} must be non-negative (got {})", name, weight);
            }
            if weight > MAX_WEIGHT {
                anyhow::bail!(
                    "weights.{} must be at most {} (got {})",
                    name,
                    MAX_WEIGHT,
                    weight
                );
            }
        }

        for name in self.ranges.keys() {
            name.parse::<Feature>()
                .with_context(|| format!("invalid key in ranges: {}", name))?;
        }

        // Ordering and total weight are only checkable once merged
        let model = self.merge()?;
        model.ranges.validate()?;
        model.weights.validate()?;

        Ok(())
    }

    /// Resolve config into a scoring model
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;
        Ok(ResolvedConfig {
            model: self.merge()?,
            config_path: None,
        })
    }

    fn merge(&self) -> Result<RiskModel> {
        let mut model = RiskModel::default();
        for (name, &weight) in &self.weights {
            model.weights.set(name.parse()?, weight);
        }
        for (name, patch) in &self.ranges {
            let feature: Feature = name.parse()?;
            let merged = patch.apply(model.ranges.get(feature));
            model.ranges.set(feature, merged);
        }
        Ok(model)
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Self {
        ResolvedConfig {
            model: RiskModel::default(),
            config_path: None,
        }
    }

    /// Resolved tables as JSON, for `config show`
    pub fn to_json(&self) -> serde_json::Value {
        let weights: serde_json::Map<String, serde_json::Value> = self
            .model
            .weights
            .iter()
            .map(|(f, w)| (f.as_str().to_string(), serde_json::json!(w)))
            .collect();
        let ranges: serde_json::Map<String, serde_json::Value> = self
            .model
            .ranges
            .iter()
            .map(|(f, r)| (f.as_str().to_string(), serde_json::json!(r)))
            .collect();

        serde_json::json!({
            "config_path": self.config_path.as_ref().map(|p| p.display().to_string()),
            "total_weight": self.model.weights.total(),
            "weights": weights,
            "ranges": ranges,
        })
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.to_json()).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Discover and load a config file from the project root
///
/// Search order:
/// 1. `.servicewatchrc.json`
/// 2. `servicewatch.config.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(project_root: &Path) -> Result<Option<(ServiceWatchConfig, PathBuf)>> {
    for name in [".servicewatchrc.json", "servicewatch.config.json"] {
        let path = project_root.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }
    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<ServiceWatchConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: ServiceWatchConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config for a project
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config from the project root.
/// Returns default config if nothing is found.
pub fn load_and_resolve(project_root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(project_root)? {
            Some((config, path)) => (config, Some(path)),
            None => (ServiceWatchConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    tracing::debug!(config_path = ?resolved.config_path, "resolved configuration");
    Ok(resolved)
}
