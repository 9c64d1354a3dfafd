// File: src/core/distribution.rs
use crate::core::aggregator::all_types;
use crate::core::types::{Lexicon, WordType};
use crate::errors::{LexiconError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-word probability vectors over a fixed type ordering.
/// `vectors[word][i]` is the probability of `types[i]` for that word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityLexicon {
    pub types: Vec<WordType>,
    pub vectors: BTreeMap<String, Vec<f64>>,
}

impl ProbabilityLexicon {
    pub fn get(&self, word: &str) -> Option<&[f64]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    /// Index of `word_type` in every vector.
    pub fn type_index(&self, word_type: &WordType) -> Option<usize> {
        self.types.binary_search(word_type).ok()
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Converts occurrence counts into probability distributions over the whole
/// type vocabulary. Consumes the lexicon; clone it first to keep the counts.
pub fn to_probability_distribution(lexicon: Lexicon) -> Result<ProbabilityLexicon> {
    // Sorted, so type_index can binary search.
    let types: Vec<WordType> = all_types(&lexicon).into_iter().collect();

    let mut vectors = BTreeMap::new();
    for (word, entry) in lexicon.into_words() {
        let mass = entry.values().fold(0u64, |total, &count| total.saturating_add(count));
        if mass == 0 {
            return Err(LexiconError::InvalidState(format!(
                "word '{}' has zero total mass",
                word
            )));
        }
        let mass = mass as f64;
        let vector: Vec<f64> = types
            .iter()
            .map(|t| entry.get(t).map_or(0.0, |&count| count as f64 / mass))
            .collect();
        vectors.insert(word, vector);
    }

    Ok(ProbabilityLexicon { types, vectors })
}
