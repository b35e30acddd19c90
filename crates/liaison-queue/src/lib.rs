//! Interactive escalation queue controller for Liaison.
//!
//! The controller holds one vendor's ranked agenda for an operator
//! session. Escalate, de-escalate, resolve, delete, and edit reorder or
//! mutate the in-memory list synchronously, then fire asynchronous
//! persistence writes that are never awaited; the next full refresh is
//! the only path back to a fully store-confirmed order.
//!
//! # Example
//!
//! ```no_run
//! use liaison_persistence::AgendaStore;
//! use liaison_queue::QueueController;
//! use liaison_models::VendorId;
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let store = AgendaStore::new("/tmp/liaison");
//! let mut queue = QueueController::new(
//!     store,
//!     VendorId::from("ven-acme"),
//!     20,
//!     runtime.handle().clone(),
//! );
//!
//! queue.refresh().unwrap();
//! if let Some(entry) = queue.items().last().cloned() {
//!     queue.escalate(entry.item.kind, &entry.item.id);
//! }
//! println!("{}", queue.export_snapshot());
//! ```

pub mod controller;
pub mod error;
pub mod export;

pub use controller::{EditFields, QueueController};
pub use error::{QueueError, Result};
pub use export::render_snapshot;
