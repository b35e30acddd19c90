//! Core data models for Liaison.
//!
//! This crate provides the fundamental data types used throughout the
//! Liaison system: the three vendor-facing record shapes (blockers, action
//! items, discussion topics), the unified work-item view the ranking
//! engine operates on, and typed identifiers.

pub mod builders;
pub mod ids;
pub mod item;
pub mod records;

// Re-export main types
pub use builders::{ActionItemBuilder, BlockerBuilder, TopicBuilder};
pub use ids::{ItemId, OwnerId, ProjectRef, VendorId};
pub use item::{EntityKind, ItemStatus, Priority, RankedItem, Severity, WorkItem};
pub use records::{ActionItem, Blocker, DiscussionTopic};
