//! Error types for join-path planning.

use thiserror::Error;

/// Errors raised while computing a join path over the semantic model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// A required base or target entity is not present in the registry.
    #[error("entity '{entity}' is not loaded")]
    EntityNotFound { entity: String },

    /// No path of declared joins connects the base entity to a target.
    #[error("no join path from '{base}' to '{target}'")]
    Unreachable { base: String, target: String },
}

/// Result type alias for JoinError
pub type JoinResult<T> = Result<T, JoinError>;
