//! Core trait definitions for record storage and interactive input.
//!
//! `RecordStore` is implemented by `quizportal-store` (files) and by
//! `mock::MemoryStore` (tests). `Console` is implemented by
//! `console::LineConsole` over any reader/writer pair.

use std::io;

use crate::error::StoreError;
use crate::records::Collection;

// ---------------------------------------------------------------------------
// Record store
// ---------------------------------------------------------------------------

/// Line-oriented access to the named collections.
///
/// A collection that was never written reads as empty. Every write is
/// durable when the call returns; there is no grouping across calls.
pub trait RecordStore: Send + Sync {
    /// Whether the collection has ever been written.
    fn exists(&self, collection: Collection) -> Result<bool, StoreError>;

    /// All raw lines of the collection in storage order.
    fn read_all(&self, collection: Collection) -> Result<Vec<String>, StoreError>;

    /// Append one line to the collection, creating it if needed.
    fn append_record(&self, collection: Collection, record: &str) -> Result<(), StoreError>;

    /// Truncate the collection and write `records` in order.
    fn reset_and_write(&self, collection: Collection, records: &[String])
        -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

/// The interactive surface a session talks to.
///
/// The read methods return `Ok(None)` once input is exhausted.
pub trait Console {
    /// Print a line of output.
    fn show(&mut self, text: &str) -> io::Result<()>;

    /// Print `prompt` and read the next whitespace-delimited token.
    fn read_token(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Print `prompt` and read a whole line. Unread tokens of the previous
    /// line are discarded first.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}
