//! Error types for sem-guard

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// The process-wide circuit breaker is open; the request was rejected
    /// without acquiring a warehouse connection.
    #[error("circuit breaker is open, try again after the cooldown")]
    CircuitOpen,
}

pub type GuardResult<T> = Result<T, GuardError>;
