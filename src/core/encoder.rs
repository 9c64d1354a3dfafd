// File: src/core/encoder.rs
use crate::errors::LexiconError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Character-to-code mapping that grows on demand.
///
/// Codes start at 1 and follow first-seen order. A code is never reassigned and
/// the dictionary never shrinks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<char>", into = "Vec<char>")]
pub struct CharacterDictionary {
    /// `symbols[code - 1]` is the character with that code.
    symbols: Vec<char>,
    codes: HashMap<char, u32>,
}

impl CharacterDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded with `a..=z` as codes 1 to 26.
    pub fn latin_lowercase() -> Self {
        let mut dictionary = Self::new();
        for c in 'a'..='z' {
            dictionary.insert(c);
        }
        dictionary
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn code(&self, c: char) -> Option<u32> {
        self.codes.get(&c).copied()
    }

    /// Encodes `text`, first extending the dictionary with any characters it
    /// has not seen yet.
    pub fn encode(&mut self, text: &str) -> Vec<u32> {
        let characters: Vec<char> = text.chars().collect();
        self.encode_chars(&characters)
    }

    pub fn encode_chars(&mut self, characters: &[char]) -> Vec<u32> {
        if let Some(codes) = self.lookup(characters) {
            return codes;
        }

        let added = self.extend(characters);
        tracing::debug!("Character dictionary grew by {} to {}", added, self.len());

        // Every character is mapped now.
        characters.iter().filter_map(|&c| self.code(c)).collect()
    }

    /// Encodes without growing; `None` if any character is unknown.
    pub fn lookup(&self, characters: &[char]) -> Option<Vec<u32>> {
        characters.iter().map(|&c| self.code(c)).collect()
    }

    /// Maps codes back to characters; `None` if a code was never assigned.
    pub fn decode(&self, codes: &[u32]) -> Option<String> {
        codes
            .iter()
            .map(|&code| {
                let index = usize::try_from(code).ok()?.checked_sub(1)?;
                self.symbols.get(index).copied()
            })
            .collect()
    }

    /// Assigns codes to unseen characters in order of first appearance.
    /// Returns how many were added.
    fn extend(&mut self, characters: &[char]) -> usize {
        let before = self.symbols.len();
        for &c in characters {
            self.insert(c);
        }
        self.symbols.len() - before
    }

    fn insert(&mut self, c: char) {
        if !self.codes.contains_key(&c) {
            self.symbols.push(c);
            self.codes.insert(c, self.symbols.len() as u32);
        }
    }
}

/// Rebuilds a stored dictionary. A repeated character would shift every later
/// code, so it is rejected.
impl TryFrom<Vec<char>> for CharacterDictionary {
    type Error = LexiconError;

    fn try_from(symbols: Vec<char>) -> Result<Self, Self::Error> {
        let mut dictionary = Self::new();
        for (position, c) in symbols.into_iter().enumerate() {
            if dictionary.codes.contains_key(&c) {
                return Err(LexiconError::InvalidInput(format!(
                    "character {:?} repeated at code {}",
                    c,
                    position + 1
                )));
            }
            dictionary.insert(c);
        }
        Ok(dictionary)
    }
}

impl From<CharacterDictionary> for Vec<char> {
    fn from(dictionary: CharacterDictionary) -> Self {
        dictionary.symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order_from_empty() {
        let mut dict = CharacterDictionary::new();
        assert_eq!(dict.encode("cab"), vec![1, 2, 3]);
        assert_eq!(dict.code('c'), Some(1));
        assert_eq!(dict.code('a'), Some(2));
        assert_eq!(dict.code('b'), Some(3));
    }

    #[test]
    fn test_growth_counts_distinct_new_characters() {
        let mut dict = CharacterDictionary::new();
        dict.encode("ab");
        let codes = dict.encode("abbbccccd");
        assert_eq!(dict.len(), 4);
        assert_eq!(codes, vec![1, 2, 2, 2, 3, 3, 3, 3, 4]);
    }

    #[test]
    fn test_stable_after_first_call() {
        let mut dict = CharacterDictionary::new();
        let first = dict.encode("hallo wereld");
        let snapshot = dict.clone();
        let second = dict.encode("hallo wereld");
        assert_eq!(first, second);
        assert_eq!(dict, snapshot);
    }

    #[test]
    fn test_latin_seed_then_extension() {
        let mut dict = CharacterDictionary::latin_lowercase();
        assert_eq!(dict.len(), 26);
        assert_eq!(dict.encode("az"), vec![1, 26]);
        assert_eq!(dict.encode("één"), vec![27, 27, 14]);
        assert_eq!(dict.len(), 27);
    }

    #[test]
    fn test_lookup_does_not_grow() {
        let dict = CharacterDictionary::latin_lowercase();
        assert!(dict.lookup(&['a', 'Q']).is_none());
        assert_eq!(dict.len(), 26);
    }

    #[test]
    fn test_decode() {
        let mut dict = CharacterDictionary::new();
        let codes = dict.encode("lexicon");
        assert_eq!(dict.decode(&codes).as_deref(), Some("lexicon"));
        assert_eq!(dict.decode(&[0]), None);
        assert_eq!(dict.decode(&[99]), None);
    }

    #[test]
    fn test_serde_keeps_codes() {
        let mut dict = CharacterDictionary::new();
        dict.encode("zy");
        let json = serde_json::to_string(&dict).unwrap();
        let restored: CharacterDictionary = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.code('z'), Some(1));
        assert_eq!(restored.code('y'), Some(2));
    }

    #[test]
    fn test_stored_duplicate_is_rejected() {
        let stored: Result<CharacterDictionary, _> = serde_json::from_str(r#"["a","a","b"]"#);
        assert!(stored.is_err());

        let err = CharacterDictionary::try_from(vec!['a', 'a', 'b']).unwrap_err();
        assert!(matches!(err, LexiconError::InvalidInput(_)));
        assert_eq!(CharacterDictionary::try_from(vec!['a', 'b']).unwrap().code('b'), Some(2));
    }
}
