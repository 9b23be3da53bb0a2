//! Error types for the record layer and the session loop.
//!
//! A missing collection is never an error: stores report it as empty. These
//! types cover genuine I/O failures underneath a store or the console.

use thiserror::Error;

use crate::records::Collection;

/// Errors raised by a `RecordStore` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file for a collection failed.
    #[error("failed to access {collection}")]
    Io {
        collection: Collection,
        #[source]
        source: std::io::Error,
    },

    /// The store cannot be used at all (e.g. a poisoned lock).
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn io(collection: Collection, source: std::io::Error) -> Self {
        StoreError::Io { collection, source }
    }
}

/// Errors that end a portal run.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Reading from or writing to the console failed.
    #[error("console I/O failed")]
    Console(#[from] std::io::Error),
}
