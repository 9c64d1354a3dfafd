//! Pipeline configuration
//!
//! Loaded from an optional TOML file; every field falls back to its default
//! when absent. Command-line flags are applied on top by the binary.

use crate::core::pruning::DEFAULT_THRESHOLD;
use crate::errors::Result;
use crate::report::{ReportThresholds, DEFAULT_TYPE_OCCURRENCE_THRESHOLDS, DEFAULT_WORD_TYPE_THRESHOLDS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Types with at most this many occurrences are pruned
    pub threshold: i64,

    /// Store the pruned lexicon under `output_dir`
    pub store: bool,

    pub output_dir: PathBuf,

    /// Breakdown of words by number of types
    pub word_type_thresholds: Vec<usize>,

    /// Breakdown of types by number of occurrences
    pub type_occurrence_thresholds: Vec<u64>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD as i64,
            store: false,
            output_dir: PathBuf::from("."),
            word_type_thresholds: DEFAULT_WORD_TYPE_THRESHOLDS.to_vec(),
            type_occurrence_thresholds: DEFAULT_TYPE_OCCURRENCE_THRESHOLDS.to_vec(),
        }
    }
}

impl LexiconConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                let config = Self::from_toml_str(&content)?;
                tracing::debug!("Loaded config from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn report_thresholds(&self) -> ReportThresholds {
        ReportThresholds {
            word_types: self.word_type_thresholds.clone(),
            type_occurrences: self.type_occurrence_thresholds.clone(),
        }
    }
}
