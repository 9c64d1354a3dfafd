// File: src/core/aggregator.rs
//! Derived views over a [`Lexicon`]: its type vocabulary, per-type occurrence
//! totals and per-word ambiguity. Every other component reads the lexicon
//! through these.

use crate::core::types::{Lexicon, TypeOccurrenceReport, WordAmbiguityReport, WordType};
use crate::errors::{LexiconError, Result};
use crate::report::{LexiconSummary, ReportThresholds};
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

/// Union of the types assigned to any word.
pub fn all_types(lexicon: &Lexicon) -> BTreeSet<WordType> {
    lexicon
        .iter()
        .flat_map(|(_, entry)| entry.keys().cloned())
        .collect()
}

/// Total occurrences of each type in `types`, summed over every word.
///
/// `types` may be a historical vocabulary larger than the lexicon's current
/// one: requested types that no word carries report zero. It must cover every
/// type the lexicon uses; a lexicon type missing from `types` fails with
/// `InvalidInput`. Sorted descending by total; ties keep the order of `types`.
pub fn type_occurrence_report(lexicon: &Lexicon, types: &BTreeSet<WordType>) -> Result<TypeOccurrenceReport> {
    let mut report: TypeOccurrenceReport = types.iter().map(|t| (t.clone(), 0)).collect();
    let index: HashMap<&WordType, usize> = types.iter().enumerate().map(|(i, t)| (t, i)).collect();

    for (word, entry) in lexicon {
        for (word_type, &count) in entry {
            let i = *index.get(word_type).ok_or_else(|| {
                LexiconError::InvalidInput(format!(
                    "type '{}' of word '{}' is not in the requested vocabulary",
                    word_type, word
                ))
            })?;
            report[i].1 = report[i].1.saturating_add(count);
        }
    }

    report.sort_by_key(|&(_, total)| Reverse(total));
    Ok(report)
}

/// Occurrence totals over the lexicon's own vocabulary.
pub fn count_type_values(lexicon: &Lexicon) -> TypeOccurrenceReport {
    let mut totals: HashMap<&WordType, u64> = HashMap::new();
    for (_, entry) in lexicon {
        for (word_type, &count) in entry {
            let total = totals.entry(word_type).or_insert(0);
            *total = total.saturating_add(count);
        }
    }

    // all_types is sorted, so ties come out in type order.
    let mut report: TypeOccurrenceReport = all_types(lexicon)
        .into_iter()
        .map(|t| {
            let total = totals.get(&t).copied().unwrap_or(0);
            (t, total)
        })
        .collect();
    report.sort_by_key(|&(_, total)| Reverse(total));
    report
}

/// Number of distinct types per word, most ambiguous first.
pub fn word_ambiguity_report(lexicon: &Lexicon) -> WordAmbiguityReport {
    let mut report: WordAmbiguityReport = lexicon
        .iter()
        .map(|(word, entry)| (word.clone(), entry.len()))
        .collect();
    report.sort_by_key(|&(_, n)| Reverse(n));
    report
}

/// Distinct words across a collection of word sequences (e.g. sentences).
///
/// ```
/// use lexicon_core::core::aggregator::extract_words;
///
/// let sentences = vec![vec!["de", "hond", "loopt"], vec!["de", "kat"]];
/// let words = extract_words(sentences);
/// assert_eq!(words.len(), 4);
/// assert!(words.contains("kat"));
/// ```
pub fn extract_words<S, W>(sequences: S) -> BTreeSet<String>
where
    S: IntoIterator,
    S::Item: IntoIterator<Item = W>,
    W: AsRef<str>,
{
    sequences
        .into_iter()
        .flatten()
        .map(|w| w.as_ref().to_string())
        .collect()
}

/// Rewrites every type through `f` and re-summarizes the result. Types of a
/// word that collapse onto the same image have their counts summed.
pub fn remap_types<F>(
    lexicon: Lexicon,
    thresholds: &ReportThresholds,
    mut f: F,
) -> (Lexicon, LexiconSummary)
where
    F: FnMut(&WordType) -> WordType,
{
    let types_before = all_types(&lexicon).len();
    let mut remapped = Lexicon::new();
    for (word, entry) in lexicon.into_words() {
        for (word_type, count) in entry {
            remapped.record(&word, f(&word_type), count);
        }
    }

    let summary = LexiconSummary::compute(&remapped, thresholds);
    tracing::info!(
        "Remapped {} types onto {} across {} words",
        types_before,
        summary.types,
        summary.words
    );
    (remapped, summary)
}
