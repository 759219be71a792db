use super::*;
use async_trait::async_trait;
use sem_core::entity::Entity;
use sem_core::execution_result::ColumnMeta;
use sem_core::registry::EntityRegistry;
use sem_db::{DbError, DbResult};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex as StdMutex;

fn accounts_entity() -> Entity {
    Entity::from_yaml(
        r#"
name: accounts
table: analytics.accounts
grain: g
dimensions:
  - name: tier
    sql: "{CUBE}.account_tier"
"#,
        "accounts",
    )
    .unwrap()
}

fn sample_outcome() -> QueryOutcome {
    QueryOutcome {
        rows: vec![vec![serde_json::Value::from(1)]],
        columns: vec![ColumnMeta { name: "id".to_string(), r#type: "number".to_string() }],
        query_id: Some("q-1".to_string()),
    }
}

struct FakeWarehouse {
    responses: StdMutex<VecDeque<Result<QueryOutcome, String>>>,
    calls: StdMutex<u32>,
}

impl FakeWarehouse {
    fn new(responses: Vec<Result<QueryOutcome, String>>) -> Self {
        Self { responses: StdMutex::new(responses.into()), calls: StdMutex::new(0) }
    }

    fn call_count(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl Warehouse for FakeWarehouse {
    async fn execute(&self, _sql: &str) -> DbResult<QueryOutcome> {
        *self.calls.lock().unwrap() += 1;
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(outcome)) => Ok(outcome),
            Some(Err(message)) => Err(DbError::ExecutionError(message)),
            None => Err(DbError::ExecutionError("no more canned responses".to_string())),
        }
    }

    async fn explain(&self, _sql: &str) -> DbResult<String> {
        Ok(String::new())
    }

    async fn cancel(&self, _query_id: &str) -> DbResult<()> {
        Ok(())
    }

    fn set_session_tag(&self, _tag: &str) {}

    fn warehouse_type(&self) -> &'static str {
        "fake"
    }
}

#[tokio::test]
async fn successful_execution_is_cached() {
    let reg = EntityRegistry::from_entities(vec![]);
    let alias_by_entity = HashMap::new();
    let ctx = RepairContext { registry: &reg, alias_by_entity: &alias_by_entity };
    let mut config = SemanticConfig::default();
    config.max_attempts = 1;
    let guard = ExecutionGuard::new(&config);
    let warehouse = FakeWarehouse::new(vec![Ok(sample_outcome())]);

    let first = guard.execute_with_repair("SELECT 1", &ctx, &warehouse).await;
    assert!(first.ok());
    assert_eq!(warehouse.call_count(), 1);

    let second = guard.execute_with_repair("SELECT 1", &ctx, &warehouse).await;
    assert!(second.ok());
    assert_eq!(warehouse.call_count(), 1, "second call should be served from cache");
}

#[tokio::test]
async fn preflight_rejects_multi_statement_sql_without_calling_the_warehouse() {
    let reg = EntityRegistry::from_entities(vec![]);
    let alias_by_entity = HashMap::new();
    let ctx = RepairContext { registry: &reg, alias_by_entity: &alias_by_entity };
    let config = SemanticConfig::default();
    let guard = ExecutionGuard::new(&config);
    let warehouse = FakeWarehouse::new(vec![]);

    let outcome = guard.execute_with_repair("SELECT 1; SELECT 2;", &ctx, &warehouse).await;
    assert!(!outcome.ok());
    assert_eq!(warehouse.call_count(), 0);
}

#[tokio::test]
async fn repairs_a_column_not_found_error_then_succeeds() {
    let reg = EntityRegistry::from_entities(vec![accounts_entity()]);
    let alias_by_entity = HashMap::from([("accounts".to_string(), "t0".to_string())]);
    let ctx = RepairContext { registry: &reg, alias_by_entity: &alias_by_entity };
    let mut config = SemanticConfig::default();
    config.max_attempts = 1;
    let guard = ExecutionGuard::new(&config);
    let warehouse = FakeWarehouse::new(vec![Err("invalid identifier 'accounts.tier'".to_string()), Ok(sample_outcome())]);

    let outcome = guard.execute_with_repair("SELECT accounts.tier FROM t0", &ctx, &warehouse).await;
    match outcome {
        ExecutionOutcome::Success(result) => {
            assert!(result.repair.repaired);
            assert_eq!(result.repair.attempted_sql, "SELECT t0.\"tier\" FROM t0");
        }
        ExecutionOutcome::Failure(f) => panic!("expected a repaired success, got failure: {}", f.error),
    }
}

#[tokio::test]
async fn opaque_failure_returns_a_failure_without_repair() {
    let reg = EntityRegistry::from_entities(vec![]);
    let alias_by_entity = HashMap::new();
    let ctx = RepairContext { registry: &reg, alias_by_entity: &alias_by_entity };
    let mut config = SemanticConfig::default();
    config.max_attempts = 1;
    let guard = ExecutionGuard::new(&config);
    let warehouse = FakeWarehouse::new(vec![Err("connection reset by peer".to_string())]);

    let outcome = guard.execute_with_repair("SELECT 1", &ctx, &warehouse).await;
    assert!(!outcome.ok());
    assert_eq!(warehouse.call_count(), 1);
}

#[tokio::test]
async fn breaker_opens_after_a_failure_and_rejects_the_next_distinct_query() {
    let reg = EntityRegistry::from_entities(vec![]);
    let alias_by_entity = HashMap::new();
    let ctx = RepairContext { registry: &reg, alias_by_entity: &alias_by_entity };
    let mut config = SemanticConfig::default();
    config.max_attempts = 1;
    config.max_repair_attempts = 0;
    config.breaker_threshold = 1;
    let guard = ExecutionGuard::new(&config);
    let warehouse = FakeWarehouse::new(vec![Err("connection reset".to_string())]);

    let first = guard.execute_with_repair("SELECT 1", &ctx, &warehouse).await;
    assert!(!first.ok());

    let second = guard.execute_with_repair("SELECT 2", &ctx, &warehouse).await;
    assert!(!second.ok());
    assert_eq!(warehouse.call_count(), 1, "the open breaker should reject the second query before calling the warehouse");
}
