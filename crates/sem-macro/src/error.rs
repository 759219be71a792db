//! Error types for macro expansion.

use thiserror::Error;

/// Errors raised while resolving macro tokens in an SQL field expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MacroError {
    /// A token referenced an entity not present in the request's alias map.
    #[error("unknown entity reference '{entity}' in expression")]
    UnknownEntity { entity: String },

    /// A token referenced a field that is not declared on the named entity.
    #[error("field '{field}' not found on entity '{entity}'")]
    FieldNotFound { entity: String, field: String },

    /// Expanding a field's `sql` required re-expanding a field already on
    /// the current expansion path.
    #[error("cyclic macro expansion: {}", path.join(" -> "))]
    CyclicExpansion { path: Vec<String> },

    /// A qualify-only call site was given a field whose `sql` is not an
    /// exact, single `{CUBE}.COL` (or `{ENTITY.COL}`) token.
    #[error("field '{field}' on entity '{entity}' is not a simple column reference")]
    NotASimpleColumn { entity: String, field: String },
}

/// Result type alias for MacroError
pub type MacroResult<T> = Result<T, MacroError>;
