// File: src/core/pruning.rs
use crate::config::LexiconConfig;
use crate::core::aggregator::count_type_values;
use crate::core::types::{Lexicon, WordType};
use crate::errors::{LexiconError, Result};
use crate::persistence::{pruned_lexicon_path, save_lexicon};
use crate::report::{LexiconSummary, ReportThresholds};
use std::collections::HashSet;
use std::path::PathBuf;

pub const DEFAULT_THRESHOLD: u64 = 4;

/// Removes rarely observed type assignments from a lexicon.
pub struct PruningEngine {
    threshold: u64,
    store_dir: Option<PathBuf>,
    report_thresholds: ReportThresholds,
}

/// Result of a pruning run. `lexicon` and `summary` are authoritative even when
/// storing the result failed.
#[derive(Debug)]
pub struct PruneOutcome {
    pub lexicon: Lexicon,
    pub summary: LexiconSummary,
    pub deleted_assignments: usize,
    pub deleted_words: usize,
    /// Number of sweeps performed.
    pub rounds: usize,
    /// `None` when storing is disabled.
    pub stored: Option<Result<PathBuf>>,
}

impl PruningEngine {
    /// Types with at most `threshold` total occurrences are removed.
    pub fn new(threshold: i64) -> Result<Self> {
        let threshold = u64::try_from(threshold).map_err(|_| {
            LexiconError::InvalidInput(format!(
                "pruning threshold must be non-negative, got {}",
                threshold
            ))
        })?;
        Ok(Self {
            threshold,
            store_dir: None,
            report_thresholds: ReportThresholds::default(),
        })
    }

    pub fn from_config(config: &LexiconConfig) -> Result<Self> {
        let mut engine = Self::new(config.threshold)?.with_report_thresholds(config.report_thresholds());
        if config.store {
            engine = engine.with_store(config.output_dir.clone());
        }
        Ok(engine)
    }

    /// Store every pruned lexicon under `dir`, in a file named after the threshold.
    pub fn with_store(mut self, dir: impl Into<PathBuf>) -> Self {
        self.store_dir = Some(dir.into());
        self
    }

    pub fn with_report_thresholds(mut self, thresholds: ReportThresholds) -> Self {
        self.report_thresholds = thresholds;
        self
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// A single sweep: drops every type whose total occurrence count is at most
    /// the threshold, then every word left without types, and re-summarizes the
    /// result.
    pub fn remove_low_occurrence_types(&self, mut lexicon: Lexicon) -> Result<PruneOutcome> {
        lexicon.validate()?;
        let (deleted_assignments, deleted_words) = self.sweep(&mut lexicon);
        tracing::info!(
            "Deleted {} types and {} words (threshold {})",
            deleted_assignments,
            deleted_words,
            self.threshold
        );
        self.finish(lexicon, deleted_assignments, deleted_words, 1)
    }

    /// Repeats the sweep until one deletes nothing.
    pub fn prune_to_fixpoint(&self, mut lexicon: Lexicon) -> Result<PruneOutcome> {
        lexicon.validate()?;
        let mut total_assignments = 0;
        let mut total_words = 0;
        let mut rounds = 0;
        loop {
            let (assignments, words) = self.sweep(&mut lexicon);
            rounds += 1;
            tracing::debug!(
                "Round {}: deleted {} types and {} words",
                rounds,
                assignments,
                words
            );
            total_assignments += assignments;
            total_words += words;
            if assignments == 0 {
                break;
            }
        }
        tracing::info!(
            "Deleted {} types and {} words in {} rounds (threshold {})",
            total_assignments,
            total_words,
            rounds,
            self.threshold
        );
        self.finish(lexicon, total_assignments, total_words, rounds)
    }

    fn sweep(&self, lexicon: &mut Lexicon) -> (usize, usize) {
        let low_occurrence: HashSet<WordType> = count_type_values(lexicon)
            .into_iter()
            .filter(|&(_, total)| total <= self.threshold)
            .map(|(word_type, _)| word_type)
            .collect();
        lexicon.retain_types(|word_type| !low_occurrence.contains(word_type))
    }

    fn finish(
        &self,
        lexicon: Lexicon,
        deleted_assignments: usize,
        deleted_words: usize,
        rounds: usize,
    ) -> Result<PruneOutcome> {
        if let Err(e) = lexicon.validate() {
            return Err(LexiconError::InvalidState(format!("pruning left a malformed lexicon: {}", e)));
        }
        let summary = LexiconSummary::compute(&lexicon, &self.report_thresholds);

        let stored = self.store_dir.as_ref().map(|dir| {
            let path = pruned_lexicon_path(dir, self.threshold);
            match save_lexicon(&lexicon, &path) {
                Ok(()) => Ok(path),
                Err(e) => {
                    tracing::warn!("Failed to store pruned lexicon at {}: {}", path.display(), e);
                    Err(e)
                }
            }
        });

        Ok(PruneOutcome {
            lexicon,
            summary,
            deleted_assignments,
            deleted_words,
            rounds,
            stored,
        })
    }
}

/// Single sweep with default report thresholds and no storage.
pub fn remove_low_occurrence_types(lexicon: Lexicon, threshold: i64) -> Result<PruneOutcome> {
    PruningEngine::new(threshold)?.remove_low_occurrence_types(lexicon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregator::all_types;

    fn sample() -> Lexicon {
        let mut lexicon = Lexicon::new();
        lexicon.record("walk", "NP", 5);
        lexicon.record("walk", "S", 2);
        lexicon.record("run", "NP", 1);
        lexicon
    }

    #[test]
    fn test_totals_are_summed_across_words() {
        let outcome = remove_low_occurrence_types(sample(), 2).unwrap();
        // NP totals 6 and survives; S totals 2 and goes.
        assert_eq!(outcome.deleted_assignments, 1);
        assert_eq!(outcome.deleted_words, 0);
        assert_eq!(outcome.lexicon.get("walk").unwrap().len(), 1);
        assert_eq!(outcome.lexicon.get("run").unwrap()[&WordType::from("NP")], 1);
        assert_eq!(outcome.summary.types, 1);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut lexicon = Lexicon::new();
        lexicon.record("a", "X", 4);
        lexicon.record("b", "Y", 5);
        let outcome = remove_low_occurrence_types(lexicon, 4).unwrap();
        assert!(!outcome.lexicon.contains_word("a"));
        assert!(outcome.lexicon.contains_word("b"));
        assert_eq!(outcome.deleted_words, 1);
    }

    #[test]
    fn test_word_removed_only_when_all_types_removed() {
        let mut lexicon = sample();
        lexicon.record("rare", "Q", 1);
        lexicon.record("rare", "NP", 1);
        lexicon.record("gone", "Q", 1);

        let before_types = all_types(&lexicon).len();
        let before_words = lexicon.len();
        let outcome = remove_low_occurrence_types(lexicon, 2).unwrap();

        assert!(outcome.lexicon.contains_word("rare"));
        assert!(!outcome.lexicon.contains_word("gone"));
        assert_eq!(outcome.deleted_assignments, 3);
        assert_eq!(outcome.deleted_words, 1);
        assert!(outcome.lexicon.len() <= before_words);
        assert!(all_types(&outcome.lexicon).len() <= before_types);
    }

    #[test]
    fn test_empty_lexicon() {
        let outcome = remove_low_occurrence_types(Lexicon::new(), 4).unwrap();
        assert!(outcome.lexicon.is_empty());
        assert_eq!(outcome.summary.words, 0);
        assert_eq!(outcome.summary.types, 0);
        assert_eq!(outcome.deleted_assignments, 0);
        assert!(outcome.stored.is_none());
    }

    #[test]
    fn test_negative_threshold_is_rejected() {
        assert!(matches!(
            PruningEngine::new(-1),
            Err(LexiconError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_malformed_input_fails_fast() {
        let lexicon: Lexicon = [("ghost".to_string(), crate::core::types::WordEntry::new())].into_iter().collect();
        assert!(matches!(
            remove_low_occurrence_types(lexicon, 4),
            Err(LexiconError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_fixpoint_matches_single_sweep() {
        let engine = PruningEngine::new(2).unwrap();
        let single = engine.remove_low_occurrence_types(sample()).unwrap();
        let converged = engine.prune_to_fixpoint(sample()).unwrap();
        assert_eq!(single.lexicon, converged.lexicon);
        assert_eq!(single.deleted_assignments, converged.deleted_assignments);
        assert_eq!(converged.rounds, 2);
    }

    #[test]
    fn test_fixpoint_on_clean_lexicon_takes_one_round() {
        let engine = PruningEngine::new(0).unwrap();
        let outcome = engine.prune_to_fixpoint(sample()).unwrap();
        assert_eq!(outcome.rounds, 1);
        assert_eq!(outcome.lexicon, sample());
    }

    #[test]
    fn test_store_writes_one_file_per_threshold() {
        let dir = tempfile::tempdir().unwrap();
        for threshold in [1, 2] {
            let engine = PruningEngine::new(threshold).unwrap().with_store(dir.path());
            let outcome = engine.remove_low_occurrence_types(sample()).unwrap();
            let path = outcome.stored.unwrap().unwrap();
            assert_eq!(path, pruned_lexicon_path(dir.path(), threshold as u64));
            assert_eq!(crate::persistence::load_lexicon(&path).unwrap(), outcome.lexicon);
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_store_failure_keeps_result() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, b"").unwrap();

        let engine = PruningEngine::new(2).unwrap().with_store(&blocker);
        let outcome = engine.remove_low_occurrence_types(sample()).unwrap();
        assert_eq!(outcome.lexicon.len(), 2);
        assert!(outcome.stored.unwrap().unwrap_err().is_io_failure());
    }
}
