//! Execution Guard (§4.6): ties preflight, timeout, retry, the circuit
//! breaker, the result cache, and auto-repair together around a `Warehouse`.

use crate::breaker::CircuitBreaker;
use crate::cache::ResultCache;
use crate::classifier::classify;
use crate::outcome::{ExecutionFailure, ExecutionOutcome};
use crate::repair::{attempt_repair, RepairContext};
use sem_core::config::SemanticConfig;
use sem_core::execution_result::{ExecutionResult, RepairMeta};
use sem_db::traits::{QueryOutcome, Warehouse};
use sem_sql::validate_syntax;
use std::time::{Duration, Instant};

/// Guards every execution issued against a `Warehouse`. One instance is
/// shared process-wide (it owns the breaker and the result cache, both of
/// which are explicitly process-scoped state per §5).
pub struct ExecutionGuard {
    statement_timeout: Duration,
    max_attempts: u8,
    retry_base_delay_ms: u64,
    max_repair_attempts: u8,
    breaker: CircuitBreaker,
    cache: ResultCache,
}

impl ExecutionGuard {
    pub fn new(config: &SemanticConfig) -> Self {
        Self {
            statement_timeout: Duration::from_millis(config.statement_timeout_ms),
            max_attempts: config.max_attempts.clamp(1, 5),
            retry_base_delay_ms: config.retry_base_delay_ms,
            // Spec §4.6: at most two repair attempts per request, fixed —
            // defended here too since a `SemanticConfig` can be built
            // directly (bypassing `validate()`) in tests.
            max_repair_attempts: config.max_repair_attempts.min(2),
            breaker: CircuitBreaker::new(config.breaker_threshold, config.breaker_cooldown_ms),
            cache: ResultCache::new(config.cache_capacity, config.cache_ttl_ms),
        }
    }

    /// Run `sql` against `warehouse`, retrying, repairing, and caching as
    /// described in §4.6. `sql` is always the cache key, even after repair.
    pub async fn execute_with_repair(&self, sql: &str, ctx: &RepairContext<'_>, warehouse: &dyn Warehouse) -> ExecutionOutcome {
        if let Some(cached) = self.cache.get(sql) {
            return ExecutionOutcome::Success(cached);
        }

        if self.breaker.is_open() {
            log::warn!("circuit breaker is open, rejecting execution without contacting the warehouse");
            return ExecutionOutcome::Failure(ExecutionFailure::new(
                "circuit breaker is open, try again after the cooldown".to_string(),
                sql.to_string(),
                false,
                None,
            ));
        }

        let preflight = validate_syntax(sql);
        if !preflight.ok {
            let message = preflight.issues.iter().map(|i| i.message.clone()).collect::<Vec<_>>().join("; ");
            return ExecutionOutcome::Failure(ExecutionFailure::new(format!("preflight rejected: {message}"), sql.to_string(), false, None));
        }

        let started_at = Instant::now();
        let mut current_sql = sql.to_string();
        let mut repair_attempts: u8 = 0;
        let mut repair_reason: Option<String> = None;

        loop {
            match self.execute_with_retries(&current_sql, warehouse).await {
                Ok(outcome) => {
                    self.breaker.record_success();
                    let result = self.finish(outcome, started_at, repair_attempts > 0, current_sql, repair_reason);
                    self.cache.insert(sql.to_string(), result.clone());
                    return ExecutionOutcome::Success(result);
                }
                Err(error_message) => {
                    self.breaker.record_failure();
                    if repair_attempts >= self.max_repair_attempts {
                        return ExecutionOutcome::Failure(ExecutionFailure::new(error_message, current_sql, repair_attempts > 0, repair_reason));
                    }
                    let class = classify(&error_message);
                    match attempt_repair(&class, &current_sql, ctx) {
                        Some(candidate) => {
                            log::debug!("repair attempt {}: {}", repair_attempts + 1, candidate.reason);
                            current_sql = candidate.sql;
                            repair_attempts += 1;
                            repair_reason = Some(candidate.reason);
                        }
                        None => {
                            return ExecutionOutcome::Failure(ExecutionFailure::new(error_message, current_sql, repair_attempts > 0, repair_reason));
                        }
                    }
                }
            }
        }
    }

    async fn execute_with_retries(&self, sql: &str, warehouse: &dyn Warehouse) -> Result<QueryOutcome, String> {
        let mut last_error = "execution never attempted".to_string();
        for attempt in 1..=self.max_attempts {
            if attempt > 1 {
                let delay_ms = self.retry_base_delay_ms.saturating_mul(1u64 << (attempt as u32 - 2));
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            match tokio::time::timeout(self.statement_timeout, warehouse.execute(sql)).await {
                Ok(Ok(outcome)) => return Ok(outcome),
                Ok(Err(db_error)) => last_error = db_error.to_string(),
                Err(_elapsed) => {
                    let _ = warehouse.cancel(sql).await;
                    last_error = "Statement timeout".to_string();
                }
            }
        }
        Err(last_error)
    }

    fn finish(&self, outcome: QueryOutcome, started_at: Instant, repaired: bool, attempted_sql: String, repair_reason: Option<String>) -> ExecutionResult {
        let truncated = ExecutionResult::compute_truncated(outcome.rows.len());
        ExecutionResult {
            rows: outcome.rows,
            columns: outcome.columns,
            last_query_id: outcome.query_id,
            execution_time_ms: started_at.elapsed().as_millis() as u64,
            truncated,
            repair: RepairMeta { attempted_sql, repaired, repair_reason },
            from_cache: false,
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
