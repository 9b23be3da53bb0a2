//! Help requests from children and replies from the teacher.
//!
//! Replies are addressed by name only; nothing links a reply to the request
//! it answers.

use std::sync::Arc;

use crate::error::StoreError;
use crate::model::{HelpRequest, Reply};
use crate::records;
use crate::traits::RecordStore;

pub struct MessageBoard {
    store: Arc<dyn RecordStore>,
}

impl MessageBoard {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn request_help(&self, student: &str, message: &str) -> Result<(), StoreError> {
        records::append(
            &*self.store,
            &HelpRequest {
                student_name: student.to_string(),
                message: message.to_string(),
            },
        )?;
        tracing::info!(student, "help requested");
        Ok(())
    }

    pub fn reply(&self, target: &str, message: &str) -> Result<(), StoreError> {
        records::append(
            &*self.store,
            &Reply {
                target_student: target.to_string(),
                message: message.to_string(),
            },
        )?;
        tracing::info!(target, "reply posted");
        Ok(())
    }

    pub fn help_requests(&self) -> Result<Vec<HelpRequest>, StoreError> {
        records::load_all(&*self.store)
    }

    pub fn replies(&self) -> Result<Vec<Reply>, StoreError> {
        records::load_all(&*self.store)
    }

    /// Replies addressed to `student`, oldest first.
    pub fn replies_for(&self, student: &str) -> Result<Vec<Reply>, StoreError> {
        Ok(self
            .replies()?
            .into_iter()
            .filter(|r| r.target_student == student)
            .collect())
    }
}
