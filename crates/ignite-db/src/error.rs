//! Database error types for ignite-db.

use ignite_core::errors::CoreError;
use thiserror::Error;

/// Errors from service operations.
///
/// `Core` carries a business rule failure. Every other variant is a storage
/// failure and is propagated as-is, never reinterpreted as a rule failure.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A progression rule rejected the request.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A SQL query failed or returned malformed data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// The business rule failure, if this is one.
    #[must_use]
    pub const fn as_core(&self) -> Option<&CoreError> {
        match self {
            Self::Core(error) => Some(error),
            _ => None,
        }
    }

    /// Whether this error came from storage rather than a progression rule.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        !matches!(self, Self::Core(_))
    }
}
