//! In-memory doubles for testing services and sessions without touching disk.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Mutex, MutexGuard};

use crate::console::LineConsole;
use crate::error::StoreError;
use crate::records::Collection;
use crate::traits::RecordStore;

/// A `RecordStore` backed by a map of line vectors.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with raw lines, replacing whatever was there.
    pub fn with_lines(self, collection: Collection, lines: &[&str]) -> Self {
        if let Ok(mut map) = self.collections.lock() {
            map.insert(collection, lines.iter().map(|l| l.to_string()).collect());
        }
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Collection, Vec<String>>>, StoreError> {
        self.collections
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

impl RecordStore for MemoryStore {
    fn exists(&self, collection: Collection) -> Result<bool, StoreError> {
        Ok(self.lock()?.contains_key(&collection))
    }

    fn read_all(&self, collection: Collection) -> Result<Vec<String>, StoreError> {
        Ok(self.lock()?.get(&collection).cloned().unwrap_or_default())
    }

    fn append_record(&self, collection: Collection, record: &str) -> Result<(), StoreError> {
        self.lock()?
            .entry(collection)
            .or_default()
            .push(record.to_string());
        Ok(())
    }

    fn reset_and_write(
        &self,
        collection: Collection,
        records: &[String],
    ) -> Result<(), StoreError> {
        self.lock()?.insert(collection, records.to_vec());
        Ok(())
    }
}

/// A console fed from a fixed transcript, capturing everything written.
pub type ScriptedConsole = LineConsole<Cursor<Vec<u8>>, Vec<u8>>;

impl LineConsole<Cursor<Vec<u8>>, Vec<u8>> {
    /// One entry per input line.
    pub fn scripted(lines: &[&str]) -> Self {
        let mut input = lines.join("\n");
        input.push('\n');
        LineConsole::new(Cursor::new(input.into_bytes()), Vec::new())
    }

    /// Everything printed so far, prompts included.
    pub fn transcript(&self) -> String {
        String::from_utf8_lossy(self.writer()).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Console;

    #[test]
    fn append_creates_collection() {
        let store = MemoryStore::new();
        assert!(!store.exists(Collection::Replies).unwrap());
        store.append_record(Collection::Replies, "To Ann: hi").unwrap();
        assert!(store.exists(Collection::Replies).unwrap());
        assert_eq!(store.read_all(Collection::Replies).unwrap(), vec!["To Ann: hi"]);
    }

    #[test]
    fn reset_replaces_contents() {
        let store = MemoryStore::new().with_lines(Collection::Quiz, &["1|a|b", "1|c|d"]);
        store
            .reset_and_write(Collection::Quiz, &["2|e|f".to_string()])
            .unwrap();
        assert_eq!(store.read_all(Collection::Quiz).unwrap(), vec!["2|e|f"]);
    }

    #[test]
    fn scripted_console_replays_lines() {
        let mut console = ScriptedConsole::scripted(&["5"]);
        assert_eq!(console.read_token("Role: ").unwrap().as_deref(), Some("5"));
        assert_eq!(console.read_token("Role: ").unwrap(), None);
        assert_eq!(console.transcript(), "Role: Role: ");
    }
}
