//! Recommender configuration. Loaded once at startup; training reads it, serving does not.

use crate::error::{RecommenderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// JSON dataset of historical records; the built-in sample is used when unset
    pub dataset_path: Option<PathBuf>,
    /// Train/test partitioning
    pub split: SplitConfig,
    /// Ensemble parameters
    pub forest: ForestConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Fraction of records withheld for evaluation (0.0–1.0)
    pub held_out_fraction: f64,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    pub n_estimators: usize,
    pub seed: u64,
    /// Unlimited when absent
    pub max_depth: Option<usize>,
    /// A node with fewer samples than this becomes a leaf
    pub min_samples_split: usize,
    /// Features considered per split
    pub max_features: MaxFeatures,
    /// Fit each tree on a bootstrap resample of the training rows
    pub bootstrap: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    Sqrt,
    All,
    Count(usize),
}

impl MaxFeatures {
    /// Number of candidate features per split for a schema of `n_features` columns.
    pub fn resolve(&self, n_features: usize) -> usize {
        let k = match *self {
            MaxFeatures::Sqrt => (n_features as f64).sqrt().floor() as usize,
            MaxFeatures::All => n_features,
            MaxFeatures::Count(k) => k,
        };
        k.clamp(1, n_features.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            split: SplitConfig::default(),
            forest: ForestConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            held_out_fraction: 0.2,
            seed: 42,
        }
    }
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            seed: 42,
            max_depth: None,
            min_samples_split: 2,
            max_features: MaxFeatures::Sqrt,
            bootstrap: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl RecommenderConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<RecommenderConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        let f = self.split.held_out_fraction;
        if !(0.0..=1.0).contains(&f) {
            return Err(RecommenderError::InvalidConfig(format!(
                "held_out_fraction must be within [0, 1], got {f}"
            )));
        }
        if self.forest.n_estimators == 0 {
            return Err(RecommenderError::InvalidConfig(
                "n_estimators must be at least 1".into(),
            ));
        }
        if self.forest.min_samples_split < 2 {
            return Err(RecommenderError::InvalidConfig(
                "min_samples_split must be at least 2".into(),
            ));
        }
        if let MaxFeatures::Count(0) = self.forest.max_features {
            return Err(RecommenderError::InvalidConfig(
                "max_features count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
