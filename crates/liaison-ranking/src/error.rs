//! Error types for ranking operations.

use liaison_persistence::PersistenceError;
use thiserror::Error;

/// Errors that can occur while assembling a ranked agenda.
#[derive(Error, Debug)]
pub enum RankingError {
    /// Persistence error while projecting stored records.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Result type alias for ranking operations.
pub type Result<T> = std::result::Result<T, RankingError>;
