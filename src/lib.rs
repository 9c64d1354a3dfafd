// src/lib.rs

pub mod config;
pub mod core;
pub mod errors;
pub mod persistence;
pub mod report;

pub use crate::config::LexiconConfig;
pub use crate::core::aggregator::{all_types, type_occurrence_report, word_ambiguity_report};
pub use crate::core::distribution::{to_probability_distribution, ProbabilityLexicon};
pub use crate::core::encoder::CharacterDictionary;
pub use crate::core::pruning::{remove_low_occurrence_types, PruneOutcome, PruningEngine};
pub use crate::core::types::{Lexicon, WordEntry, WordType};
pub use crate::errors::{LexiconError, Result};
pub use crate::report::{LexiconSummary, ReportThresholds};
