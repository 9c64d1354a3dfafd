// src/core/types.rs
use crate::errors::{LexiconError, Result};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// An opaque grammatical type assigned to a word by the extraction pipeline.
/// Never inspected, only compared and hashed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordType(String);

impl WordType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WordType {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for WordType {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Observed type assignments of a single word, with their occurrence counts.
pub type WordEntry = BTreeMap<WordType, u64>;

/// (type, total occurrences across all words), descending by total.
pub type TypeOccurrenceReport = Vec<(WordType, u64)>;

/// (word, number of distinct types), descending by type count.
pub type WordAmbiguityReport = Vec<(String, usize)>;

/// Mapping from word to the types it was observed with.
///
/// A word present in the lexicon always has at least one type; removing the
/// last type of a word removes the word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lexicon {
    words: BTreeMap<String, WordEntry>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` observations of `word` with type `word_type`.
    /// Counts saturate at `u64::MAX`.
    pub fn record(&mut self, word: &str, word_type: impl Into<WordType>, count: u64) {
        let current = self
            .words
            .entry(word.to_string())
            .or_default()
            .entry(word_type.into())
            .or_insert(0);
        *current = current.saturating_add(count);
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&WordEntry> {
        self.words.get(word)
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, WordEntry> {
        self.words.iter()
    }

    /// Sum of every count in the lexicon.
    pub fn total_occurrences(&self) -> u64 {
        self.words
            .values()
            .flat_map(|entry| entry.values())
            .fold(0, |total, &count| total.saturating_add(count))
    }

    /// Removes the type assignments rejected by `keep` and drops any word left
    /// without types. Returns (assignments removed, words removed).
    pub(crate) fn retain_types<F>(&mut self, mut keep: F) -> (usize, usize)
    where
        F: FnMut(&WordType) -> bool,
    {
        let mut deleted_assignments = 0;
        for entry in self.words.values_mut() {
            let before = entry.len();
            entry.retain(|word_type, _| keep(word_type));
            deleted_assignments += before - entry.len();
        }

        let before = self.words.len();
        self.words.retain(|_, entry| !entry.is_empty());
        (deleted_assignments, before - self.words.len())
    }

    pub(crate) fn into_words(self) -> BTreeMap<String, WordEntry> {
        self.words
    }

    /// Checks that no word is mapped to an empty entry.
    pub fn validate(&self) -> Result<()> {
        match self.words.iter().find(|(_, entry)| entry.is_empty()) {
            Some((word, _)) => Err(LexiconError::InvalidInput(format!(
                "word '{}' has no type assignments",
                word
            ))),
            None => Ok(()),
        }
    }
}

impl FromIterator<(String, WordEntry)> for Lexicon {
    fn from_iter<I: IntoIterator<Item = (String, WordEntry)>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Lexicon {
    type Item = (&'a String, &'a WordEntry);
    type IntoIter = btree_map::Iter<'a, String, WordEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}
