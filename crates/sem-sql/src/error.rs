//! Error types for SQL rendering.

use thiserror::Error;

/// Errors raised while rendering a `FinalizedPlan` into executable SQL.
///
/// Validation failures are reported separately as a [`crate::validator::ValidationReport`]
/// rather than as a `RenderError` — rendering only fails for conditions a
/// valid plan should never produce.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// `intent.metrics` named something that is neither a metric nor a
    /// measure on any entity in `orderedEntities`.
    #[error("metric or measure '{name}' not found on any selected entity")]
    MetricNotFound { name: String },

    /// `intent.timeRange` was set but the base entity declares no time dimension.
    #[error("entity '{entity}' has no time dimension to anchor the time range")]
    NoTimeDimension { entity: String },

    /// A structured or metric filter used an operator/value-count combination
    /// that is not valid (list op with no values, scalar op with != 1 value).
    #[error("filter on '{field}' has an invalid value count for its operator")]
    InvalidFilterArity { field: String },

    /// Propagated from the join planner.
    #[error(transparent)]
    Join(#[from] sem_join::JoinError),

    /// Propagated from the macro expander.
    #[error(transparent)]
    Macro(#[from] sem_macro::MacroError),
}

/// Result type alias for RenderError
pub type RenderResult<T> = Result<T, RenderError>;
