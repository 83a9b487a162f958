//! Error types for lightbnb-db

use thiserror::Error;

use crate::models::ValidationError;

pub type Result<T> = std::result::Result<T, DbError>;

/// Failure of a data-access operation.
///
/// An empty result set is never an error: searches with no matches return
/// an empty vector and single-row lookups return `None`.
#[derive(Debug, Error)]
pub enum DbError {
    /// Caller supplied a malformed filter, limit or record. Nothing was sent
    /// to the store.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// The store rejected the statement or could not run it (connection
    /// loss, timeout, syntax error, constraint violation).
    #[error("query failed: {0}")]
    QueryFailed(#[from] sqlx::Error),
}

impl DbError {
    /// True when the error was raised before touching the store.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
