//! Error types for queue controller operations.

use liaison_persistence::PersistenceError;
use liaison_ranking::RankingError;
use thiserror::Error;

/// Errors that can surface synchronously from queue operations.
///
/// Background write failures never appear here; they are logged and the
/// optimistic local state is kept (see crate docs).
#[derive(Error, Debug)]
pub enum QueueError {
    /// Persistence error on a synchronous path (item creation).
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Ranking error while refreshing the agenda.
    #[error("ranking error: {0}")]
    Ranking(#[from] RankingError),
}

/// Result type alias for queue operations.
pub type Result<T> = std::result::Result<T, QueueError>;
