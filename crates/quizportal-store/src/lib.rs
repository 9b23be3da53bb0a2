//! quizportal-store — File-backed record storage and configuration.
//!
//! Implements the `RecordStore` trait over one line-oriented text file per
//! collection, and loads the portal configuration that says where those
//! files live.

pub mod config;
pub mod file;

pub use config::{load_config, open_store, PortalConfig};
pub use file::FileStore;
