//! The child roster. Membership is the only credential a child has.

use std::sync::Arc;

use crate::error::StoreError;
use crate::model::ChildRegistration;
use crate::records;
use crate::traits::RecordStore;

pub struct Roster {
    store: Arc<dyn RecordStore>,
}

impl Roster {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Add a child. Registering the same name twice is allowed.
    pub fn register(&self, name: &str) -> Result<(), StoreError> {
        records::append(
            &*self.store,
            &ChildRegistration {
                child_name: name.to_string(),
            },
        )?;
        tracing::info!(child = name, "child registered");
        Ok(())
    }

    /// Exact, case-sensitive name match against any registration.
    pub fn is_registered(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.children()?.iter().any(|c| c.child_name == name))
    }

    pub fn children(&self) -> Result<Vec<ChildRegistration>, StoreError> {
        records::load_all(&*self.store)
    }
}
