//! Run configuration: column bindings, strategy parameters, blend weights,
//! and report options.

use crate::aggregate::Weights;
use crate::scoring::{AiMode, ScoreKind};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::IntoEnumIterator;

/// The configuration written by `player-rank init` and used when no
/// `--config` is given.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("default.toml");

/// Which input columns play which role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnsConfig {
    /// First base measurement (normalized header name).
    pub base_a: String,

    /// Second base measurement (normalized header name).
    pub base_b: String,

    /// Entity name column, used only for reporting.
    pub name: String,

    /// Category column for grouped ranking/flagging; omit to disable the
    /// per-category features.
    #[serde(default)]
    pub category: Option<String>,
}

/// Parameters for the `weighted_score` strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightedParams {
    pub w1: f64,
    pub w2: f64,
}

impl Default for WeightedParams {
    fn default() -> Self {
        Self { w1: 0.6, w2: 0.4 }
    }
}

/// Parameters for the `custom_score` strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomParams {
    pub threshold: f64,
    pub bonus: f64,
}

impl Default for CustomParams {
    fn default() -> Self {
        Self {
            threshold: 1.5,
            bonus: 0.2,
        }
    }
}

/// Parameters for the `ai_score` strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AiParams {
    #[serde(default)]
    pub mode: AiMode,

    /// Explicit seed for the clustering mode; regression ignores it.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

const fn default_seed() -> u64 {
    42
}

impl Default for AiParams {
    fn default() -> Self {
        Self {
            mode: AiMode::default(),
            seed: default_seed(),
        }
    }
}

/// Per-strategy tuning knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategiesConfig {
    #[serde(default)]
    pub weighted: WeightedParams,

    #[serde(default)]
    pub custom: CustomParams,

    #[serde(default)]
    pub ai: AiParams,
}

/// Report shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// How many entities the overall and per-category reports list.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// K for the per-category flag column.
    #[serde(default = "default_top_n")]
    pub category_top_k: usize,
}

const fn default_top_n() -> usize {
    3
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            category_top_k: default_top_n(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub columns: ColumnsConfig,

    /// Blend weights for the ultimate score, keyed by score column name.
    pub weights: Weights,

    #[serde(default)]
    pub strategies: StrategiesConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("could not find configuration file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse configuration file {}", path.display()))?;
        config.check()?;
        Ok(config)
    }

    /// The built-in default configuration.
    pub fn default_config() -> Result<Self> {
        let config: Self =
            toml::from_str(DEFAULT_CONFIG_TOML).context("embedded default config is invalid")?;
        config.check()?;
        Ok(config)
    }

    /// Hard configuration errors.
    fn check(&self) -> Result<()> {
        for (name, weight) in &self.weights {
            if *weight < 0.0 {
                bail!("weight for '{name}' is negative ({weight}); weights must be non-negative");
            }
            if !weight.is_finite() {
                bail!("weight for '{name}' is not finite");
            }
        }
        if self.columns.base_a == self.columns.base_b {
            bail!(
                "base_a and base_b both name column '{}'",
                self.columns.base_a
            );
        }
        Ok(())
    }

    /// Soft problems worth surfacing to the user without stopping the run.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let known: Vec<String> = ScoreKind::iter().map(ScoreKind::column_name).collect();
        for name in self.weights.keys() {
            if !known.contains(name) {
                warnings.push(format!(
                    "weights: '{name}' is not a built-in score column; it must exist in the table at aggregation time"
                ));
            }
        }
        if self.weights.values().all(|w| *w == 0.0) {
            warnings.push("weights: every weight is zero; ultimate_score will be all zeros".to_string());
        }
        if self.report.top_n == 0 {
            warnings.push("report: top_n is zero; reports will be empty".to_string());
        }
        if self.strategies.weighted.w1 + self.strategies.weighted.w2 == 0.0 {
            warnings.push("strategies.weighted: w1 + w2 is zero; weighted_score will be all zeros".to_string());
        }
        if self.columns.category.is_none() {
            warnings.push("columns: no category column; per-category reports and flags are disabled".to_string());
        }

        warnings
    }
}
