// File: src/report.rs
use crate::core::aggregator::{all_types, count_type_values, word_ambiguity_report};
use crate::core::types::Lexicon;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_WORD_TYPE_THRESHOLDS: [usize; 5] = [2, 3, 5, 10, 15];
pub const DEFAULT_TYPE_OCCURRENCE_THRESHOLDS: [u64; 3] = [5, 10, 20];

/// Cut-off points for the ambiguity and generality breakdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportThresholds {
    /// Count words carrying at least this many types.
    pub word_types: Vec<usize>,
    /// Count types occurring at least this many times.
    pub type_occurrences: Vec<u64>,
}

impl Default for ReportThresholds {
    fn default() -> Self {
        Self {
            word_types: DEFAULT_WORD_TYPE_THRESHOLDS.to_vec(),
            type_occurrences: DEFAULT_TYPE_OCCURRENCE_THRESHOLDS.to_vec(),
        }
    }
}

/// Mean and population standard deviation. Both are zero for an empty sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    pub mean: f64,
    pub std_dev: f64,
}

impl Moments {
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() {
            return Self::default();
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }
}

/// Snapshot statistics of a lexicon, printable as the human-readable report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconSummary {
    pub words: usize,
    pub types: usize,
    pub types_per_word: Moments,
    pub occurrences_per_type: Moments,
    pub words_with_one_type: usize,
    /// (threshold, words with at least that many types)
    pub words_with_at_least: Vec<(usize, usize)>,
    pub types_with_one_occurrence: usize,
    /// (threshold, types with at least that many occurrences)
    pub types_with_at_least: Vec<(u64, usize)>,
}

impl LexiconSummary {
    pub fn compute(lexicon: &Lexicon, thresholds: &ReportThresholds) -> Self {
        let types = all_types(lexicon);
        let ambiguity: Vec<usize> = word_ambiguity_report(lexicon)
            .into_iter()
            .map(|(_, n)| n)
            .collect();
        let generality: Vec<u64> = count_type_values(lexicon)
            .into_iter()
            .map(|(_, n)| n)
            .collect();

        Self {
            words: lexicon.len(),
            types: types.len(),
            types_per_word: Moments::of(ambiguity.iter().map(|&n| n as f64)),
            occurrences_per_type: Moments::of(generality.iter().map(|&n| n as f64)),
            words_with_one_type: ambiguity.iter().filter(|&&n| n == 1).count(),
            words_with_at_least: thresholds
                .word_types
                .iter()
                .map(|&t| (t, ambiguity.iter().filter(|&&n| n >= t).count()))
                .collect(),
            types_with_one_occurrence: generality.iter().filter(|&&n| n == 1).count(),
            types_with_at_least: thresholds
                .type_occurrences
                .iter()
                .map(|&t| (t, generality.iter().filter(|&&n| n >= t).count()))
                .collect(),
        }
    }
}

impl fmt::Display for LexiconSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Words inspected: {}", self.words)?;
        writeln!(f, "Types extracted: {}", self.types)?;
        writeln!(f, "Average types per word: {:.4}", self.types_per_word.mean)?;
        writeln!(f, "Standard deviation of types per word: {:.4}", self.types_per_word.std_dev)?;
        writeln!(f, "Average occurrences per type: {:.4}", self.occurrences_per_type.mean)?;
        writeln!(
            f,
            "Standard deviation of occurrences per type: {:.4}",
            self.occurrences_per_type.std_dev
        )?;
        writeln!(f, "Words with just 1 type: {}", self.words_with_one_type)?;
        for (threshold, count) in &self.words_with_at_least {
            writeln!(f, "Words with {} or more types: {}", threshold, count)?;
        }
        writeln!(f, "Types with just 1 occurrence: {}", self.types_with_one_occurrence)?;
        for (threshold, count) in &self.types_with_at_least {
            writeln!(f, "Types with at least {} occurrences: {}", threshold, count)?;
        }
        write!(f, "-----------------------------------------------------------")
    }
}
