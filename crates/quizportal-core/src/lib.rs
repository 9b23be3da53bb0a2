//! quizportal-core — Record layer, role services, and the session state machine.
//!
//! This crate defines the data model and line codecs for the portal's flat
//! record collections, the services built on top of them (authentication,
//! quiz bank, progress ledger, roster, message board), and the
//! `SessionController` that drives a menu session for each role.

pub mod auth;
pub mod board;
pub mod console;
pub mod error;
pub mod ledger;
pub mod mock;
pub mod model;
pub mod quiz;
pub mod records;
pub mod roster;
pub mod session;
pub mod traits;

pub use error::{PortalError, StoreError};
pub use session::{PortalState, Session, SessionController};
pub use traits::{Console, RecordStore};
