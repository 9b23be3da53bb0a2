//! The quiz bank: graded questions tagged by level.

use std::sync::Arc;

use crate::error::StoreError;
use crate::model::{Level, QuizQuestion};
use crate::records::{self, Record};
use crate::traits::RecordStore;

/// The canonical default bank, three questions per level, in order.
pub const DEFAULT_QUESTIONS: [(Level, &str, &str); 9] = [
    (1, "Extension of C++ file?", ".cpp"),
    (1, "Is C++ case-sensitive?", "yes"),
    (1, "Standard output keyword?", "cout"),
    (2, "Data type for integers?", "int"),
    (2, "Size of char in bytes?", "1"),
    (2, "Data type for decimals?", "float"),
    (3, "Is int primitive?", "yes"),
    (3, "First index of array?", "0"),
    (3, "Symbol for address?", "&"),
];

/// The default bank as owned questions.
pub fn default_questions() -> Vec<QuizQuestion> {
    DEFAULT_QUESTIONS
        .iter()
        .map(|&(level, prompt, answer)| QuizQuestion::new(level, prompt, answer))
        .collect()
}

pub struct QuizBank {
    store: Arc<dyn RecordStore>,
}

impl QuizBank {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Replace the whole bank with the default questions.
    pub fn reset_to_defaults(&self) -> Result<(), StoreError> {
        let lines: Vec<String> = default_questions().iter().map(QuizQuestion::encode).collect();
        self.store.reset_and_write(QuizQuestion::COLLECTION, &lines)?;
        tracing::info!(count = lines.len(), "quiz bank reset to defaults");
        Ok(())
    }

    /// Append one question.
    ///
    /// The level is not range-checked: authors may file questions under any
    /// integer, and a level outside the child menu is simply never asked.
    pub fn append(&self, level: Level, prompt: &str, answer: &str) -> Result<(), StoreError> {
        records::append(&*self.store, &QuizQuestion::new(level, prompt, answer))?;
        tracing::debug!(level, "question appended");
        Ok(())
    }

    /// Questions for `level` in storage order.
    ///
    /// Each call re-reads the store; records are decoded as the iterator
    /// advances.
    pub fn questions_for_level(
        &self,
        level: Level,
    ) -> Result<impl Iterator<Item = QuizQuestion>, StoreError> {
        let lines = self.store.read_all(QuizQuestion::COLLECTION)?;
        Ok(records::decode_lines::<QuizQuestion>(lines).filter(move |q| q.level == level))
    }

    /// Every question in the bank.
    pub fn all(&self) -> Result<Vec<QuizQuestion>, StoreError> {
        records::load_all(&*self.store)
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.all()?.is_empty())
    }
}
