//! The result of executing a rendered SQL statement against the warehouse.

use serde::{Deserialize, Serialize};

/// A result column's name and warehouse-reported scalar type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    pub r#type: String,
}

/// Repair metadata attached to every `ExecutionResult`, whether or not a
/// repair was actually attempted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepairMeta {
    /// The SQL actually sent to the warehouse on the last attempt.
    pub attempted_sql: String,
    /// Whether the attempted SQL differs from the original.
    pub repaired: bool,
    /// Human-readable description of the repair strategy applied, if any.
    pub repair_reason: Option<String>,
}

/// The outcome of a single guarded execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub rows: Vec<Vec<serde_json::Value>>,
    pub columns: Vec<ColumnMeta>,
    #[serde(default)]
    pub last_query_id: Option<String>,
    pub execution_time_ms: u64,
    pub truncated: bool,
    pub repair: RepairMeta,
    /// Whether this result came from the result cache rather than a live
    /// execution (§8 scenario 6).
    #[serde(default)]
    pub from_cache: bool,
}

impl ExecutionResult {
    /// `rows.len() >= 1001` per the renderer's `LIMIT 1001` contract (§4.4).
    pub fn compute_truncated(row_count: usize) -> bool {
        row_count >= 1001
    }
}

#[cfg(test)]
#[path = "execution_result_test.rs"]
mod tests;
