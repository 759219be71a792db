//! Error types for sem-db

use thiserror::Error;

/// Warehouse operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error
    #[error("warehouse connection error: {0}")]
    ConnectionError(String),

    /// Query execution error, as reported by the underlying driver
    #[error("warehouse execution error: {0}")]
    ExecutionError(String),

    /// A statement did not finish before its timeout
    #[error("warehouse statement timed out")]
    Timeout,

    /// A previously-issued query id could not be cancelled (already finished
    /// or unknown to the warehouse)
    #[error("no running query with id: {0}")]
    UnknownQueryId(String),

    /// Not implemented by this backend
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// Internal error
    #[error("internal warehouse error: {0}")]
    Internal(String),
}

/// Result type alias for `DbError`
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        DbError::ExecutionError(err.to_string())
    }
}
