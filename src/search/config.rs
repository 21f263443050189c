//! Configuration for search sessions and providers.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::query::scorer::ScoreWeights;

/// Configuration for searching recently used files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Points awarded per kind of match.
    pub weights: ScoreWeights,

    /// Maximum number of hits handed to the presentation layer.
    /// The session itself always keeps every match so that refining
    /// never loses records.
    pub max_results: Option<usize>,

    /// Drop local files that no longer exist when the record cache is built.
    pub skip_missing_files: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            weights: ScoreWeights::default(),
            max_results: None,
            skip_missing_files: true,
        }
    }
}

impl SearchConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: SearchConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()
    }

    /// Set the score weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the maximum number of hits to present.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Set whether missing local files are dropped.
    pub fn with_skip_missing_files(mut self, skip: bool) -> Self {
        self.skip_missing_files = skip;
        self
    }
}
