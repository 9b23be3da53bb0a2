//! Append-only quiz results, level unlocking, and aggregate statistics.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::{Level, ScoreRecord};
use crate::records;
use crate::traits::RecordStore;

/// Minimum score on an attempt that unlocks the higher levels.
pub const DEFAULT_PASS_THRESHOLD: u32 = 2;

/// The results log and the rules derived from it.
pub struct ProgressLedger {
    store: Arc<dyn RecordStore>,
    pass_threshold: u32,
}

impl ProgressLedger {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            pass_threshold: DEFAULT_PASS_THRESHOLD,
        }
    }

    pub fn with_pass_threshold(mut self, threshold: u32) -> Self {
        self.pass_threshold = threshold;
        self
    }

    pub fn pass_threshold(&self) -> u32 {
        self.pass_threshold
    }

    /// Append one attempt. Earlier attempts are never touched.
    pub fn record_score(&self, student: &str, level: Level, score: u32) -> Result<(), StoreError> {
        let record = ScoreRecord {
            student_name: student.to_string(),
            level,
            score,
        };
        records::append(&*self.store, &record)?;
        tracing::info!(student, level, score, "score recorded");
        Ok(())
    }

    /// Every attempt in insertion order.
    pub fn results(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        records::load_all(&*self.store)
    }

    /// Whether `student` has ever reached the pass threshold on any level.
    ///
    /// This deliberately looks at the whole history, not just the level below
    /// the one being attempted: a pass on level 1 opens both 2 and 3.
    pub fn has_qualifying_prior_score(&self, student: &str) -> Result<bool, StoreError> {
        Ok(self
            .results()?
            .iter()
            .any(|r| r.student_name == student && r.score >= self.pass_threshold))
    }

    /// Level 1 (and anything below) is always open; every other level needs a
    /// qualifying prior score.
    pub fn unlocked(&self, student: &str, level: Level) -> Result<bool, StoreError> {
        if level <= 1 {
            return Ok(true);
        }
        self.has_qualifying_prior_score(student)
    }

    /// Mean score across every attempt, or `None` when nothing is recorded.
    pub fn class_average(&self) -> Result<Option<f64>, StoreError> {
        Ok(mean_score(&self.results()?))
    }

    /// Per-student progress plus class-wide totals.
    pub fn summary(&self) -> Result<LedgerSummary, StoreError> {
        Ok(summarize(&self.results()?, self.pass_threshold))
    }
}

/// Arithmetic mean of `score` over all records.
pub fn mean_score(results: &[ScoreRecord]) -> Option<f64> {
    if results.is_empty() {
        return None;
    }
    let total: u64 = results.iter().map(|r| r.score as u64).sum();
    Some(total as f64 / results.len() as f64)
}

/// Aggregate view of the results log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Total attempts recorded.
    pub attempts: usize,
    /// Mean score over every attempt.
    pub class_average: Option<f64>,
    /// One entry per student, in order of first attempt.
    pub students: Vec<StudentProgress>,
}

/// Progress for a single student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProgress {
    pub name: String,
    pub attempts: usize,
    /// Best score seen on each attempted level.
    pub best_by_level: BTreeMap<Level, u32>,
    /// Whether levels above 1 are open to this student.
    pub higher_levels_unlocked: bool,
}

/// Build a `LedgerSummary` from raw results.
pub fn summarize(results: &[ScoreRecord], pass_threshold: u32) -> LedgerSummary {
    let mut students: Vec<StudentProgress> = Vec::new();
    for r in results {
        let idx = match students.iter().position(|s| s.name == r.student_name) {
            Some(i) => i,
            None => {
                students.push(StudentProgress {
                    name: r.student_name.clone(),
                    attempts: 0,
                    best_by_level: BTreeMap::new(),
                    higher_levels_unlocked: false,
                });
                students.len() - 1
            }
        };
        let entry = &mut students[idx];
        entry.attempts += 1;
        let best = entry.best_by_level.entry(r.level).or_insert(0);
        *best = (*best).max(r.score);
        if r.score >= pass_threshold {
            entry.higher_levels_unlocked = true;
        }
    }

    LedgerSummary {
        attempts: results.len(),
        class_average: mean_score(results),
        students,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MemoryStore;

    fn ledger() -> ProgressLedger {
        ProgressLedger::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn qualifying_score_after_pass() {
        let ledger = ledger();
        assert!(!ledger.has_qualifying_prior_score("Ann").unwrap());

        ledger.record_score("Ann", 1, 2).unwrap();

        assert!(ledger.has_qualifying_prior_score("Ann").unwrap());
        assert!(!ledger.has_qualifying_prior_score("Ben").unwrap());
    }

    #[test]
    fn low_scores_do_not_qualify() {
        let ledger = ledger();
        ledger.record_score("Ann", 1, 1).unwrap();
        ledger.record_score("Ann", 1, 0).unwrap();
        assert!(!ledger.unlocked("Ann", 2).unwrap());
        assert!(ledger.unlocked("Ann", 1).unwrap());
    }

    #[test]
    fn any_level_pass_unlocks_every_level() {
        let ledger = ledger();
        ledger.record_score("Cara", 1, 3).unwrap();
        assert!(ledger.unlocked("Cara", 2).unwrap());
        assert!(ledger.unlocked("Cara", 3).unwrap());
    }

    #[test]
    fn custom_threshold() {
        let ledger = ledger().with_pass_threshold(3);
        ledger.record_score("Ann", 1, 2).unwrap();
        assert!(!ledger.has_qualifying_prior_score("Ann").unwrap());
        ledger.record_score("Ann", 1, 3).unwrap();
        assert!(ledger.has_qualifying_prior_score("Ann").unwrap());
    }

    #[test]
    fn class_average_over_all_records() {
        let ledger = ledger();
        ledger.record_score("Ann", 1, 3).unwrap();
        ledger.record_score("Ben", 2, 2).unwrap();
        ledger.record_score("Ann", 3, 1).unwrap();

        let avg = ledger.class_average().unwrap().unwrap();
        assert!((avg - 2.0).abs() < f64::EPSILON, "expected 2.0, got {avg}");
    }

    #[test]
    fn class_average_without_data() {
        assert_eq!(ledger().class_average().unwrap(), None);
    }

    #[test]
    fn attempts_accumulate() {
        let ledger = ledger();
        ledger.record_score("Ann", 1, 1).unwrap();
        ledger.record_score("Ann", 1, 1).unwrap();
        assert_eq!(ledger.results().unwrap().len(), 2);
    }

    #[test]
    fn summary_groups_by_student() {
        let ledger = ledger();
        ledger.record_score("Ann", 1, 1).unwrap();
        ledger.record_score("Ben", 1, 3).unwrap();
        ledger.record_score("Ann", 1, 2).unwrap();
        ledger.record_score("Ann", 2, 0).unwrap();

        let summary = ledger.summary().unwrap();
        assert_eq!(summary.attempts, 4);
        assert_eq!(summary.students.len(), 2);

        let ann = &summary.students[0];
        assert_eq!(ann.name, "Ann");
        assert_eq!(ann.attempts, 3);
        assert_eq!(ann.best_by_level.get(&1), Some(&2));
        assert_eq!(ann.best_by_level.get(&2), Some(&0));
        assert!(ann.higher_levels_unlocked);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"class_average\":1.5"));
    }
}
