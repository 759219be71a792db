//! Warehouse driver trait (§4.8)

use crate::error::DbResult;
use async_trait::async_trait;
use sem_core::execution_result::ColumnMeta;

/// The raw outcome of a single statement, before the guard layer attaches
/// timing, truncation, repair, and cache metadata (§4.6).
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub rows: Vec<Vec<serde_json::Value>>,
    pub columns: Vec<ColumnMeta>,
    pub query_id: Option<String>,
}

/// Warehouse abstraction for the semantic layer.
///
/// Implementations must be `Send + Sync`: the phase orchestrator and the
/// execution guard drive warehouses from async tasks and may hold a
/// reference across `.await` points.
#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Execute a single read-only SELECT statement and return its rows.
    async fn execute(&self, sql: &str) -> DbResult<QueryOutcome>;

    /// Return the warehouse's query plan for `sql` without running it, used
    /// for cheap cost estimation ahead of a real execution.
    async fn explain(&self, sql: &str) -> DbResult<String>;

    /// Best-effort cancellation of a previously issued query, identified by
    /// the `query_id` a prior `QueryOutcome` reported.
    async fn cancel(&self, query_id: &str) -> DbResult<()>;

    /// Attach a free-form tag to the current session, surfaced in warehouse
    /// logs/query history for correlation with the originating request.
    fn set_session_tag(&self, tag: &str);

    /// Warehouse type identifier, used only for logging.
    fn warehouse_type(&self) -> &'static str;
}
