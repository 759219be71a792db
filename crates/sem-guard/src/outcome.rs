//! The result of a guarded execution: either a successful `ExecutionResult`
//! or the non-fatal failure shape carried into Reporting (§4.7).

use sem_core::execution_result::ExecutionResult;
use serde::{Deserialize, Serialize};

/// `{ok:false, error, attemptedSql, repaired, repairReason}` from §4.7.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionFailure {
    pub ok: bool,
    pub error: String,
    pub attempted_sql: String,
    pub repaired: bool,
    pub repair_reason: Option<String>,
}

impl ExecutionFailure {
    pub fn new(error: String, attempted_sql: String, repaired: bool, repair_reason: Option<String>) -> Self {
        Self {
            ok: false,
            error,
            attempted_sql,
            repaired,
            repair_reason,
        }
    }
}

/// The outcome of `ExecutionGuard::execute_with_repair`. An execution
/// failure after exhausting retries and repair attempts is non-fatal: the
/// orchestrator still runs Reporting over it (§4.7).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExecutionOutcome {
    Success(ExecutionResult),
    Failure(ExecutionFailure),
}

impl ExecutionOutcome {
    pub fn ok(&self) -> bool {
        matches!(self, ExecutionOutcome::Success(_))
    }
}

#[cfg(test)]
#[path = "outcome_test.rs"]
mod tests;
