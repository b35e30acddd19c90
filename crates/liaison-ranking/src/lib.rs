//! Scoring and ranking for Liaison vendor agendas.
//!
//! Three read-only source adapters project stored blockers, action items,
//! and discussion topics into the shared [`liaison_models::WorkItem`]
//! shape, computing age and severity at read time. The pure scoring
//! engine turns one normalized item into a number; the assembler merges,
//! scores, sorts, and ranks the open items of one vendor.
//!
//! # Example
//!
//! ```no_run
//! use liaison_persistence::AgendaStore;
//! use liaison_ranking::RankingAssembler;
//! use liaison_models::VendorId;
//!
//! let store = AgendaStore::new("/tmp/liaison");
//! let assembler = RankingAssembler::new(&store);
//!
//! let agenda = assembler
//!     .ranked_agenda(&VendorId::from("ven-acme"), 20)
//!     .unwrap();
//! for entry in &agenda {
//!     println!("{:>2}. [{:>3.0}] {}", entry.rank, entry.score, entry.item.title);
//! }
//! ```

pub mod adapters;
pub mod assembler;
pub mod error;
pub mod score;

pub use adapters::{ActionItemAdapter, BlockerAdapter, SourceAdapter, TopicAdapter};
pub use assembler::{RankingAssembler, DEFAULT_LIMIT};
pub use error::{RankingError, Result};
pub use score::score;
