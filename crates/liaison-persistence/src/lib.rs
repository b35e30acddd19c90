//! Persistence layer for Liaison.
//!
//! This crate provides crash-safe persistence for vendor work records
//! using atomic file operations (write to temp file, then rename). Each
//! record type gets its own store; all three share one directory layout
//! under the state directory:
//!
//! ```text
//! base_path/
//! └── vendors/
//!     └── {vendor_id}/
//!         ├── blockers/itm-....json
//!         ├── action_items/itm-....json
//!         └── topics/itm-....json
//! ```
//!
//! Writes are last-write-wins; no store-level locking is attempted.

pub mod atomic;
pub mod error;
pub mod store;

pub use error::{PersistenceError, Result};
pub use store::{ActionItemStore, AgendaStore, BlockerStore, TopicStore};
