//! Embedded DuckDB warehouse backend.

use crate::error::{DbError, DbResult};
use crate::traits::{QueryOutcome, Warehouse};
use async_trait::async_trait;
use duckdb::Connection;
use sem_core::execution_result::ColumnMeta;
use std::path::Path;
use std::sync::Mutex;

/// A single embedded DuckDB connection, guarded by a mutex since the
/// `duckdb` crate's `Connection` is not internally synchronized.
pub struct DuckDbWarehouse {
    conn: Mutex<Connection>,
    session_tag: Mutex<Option<String>>,
}

impl DuckDbWarehouse {
    /// Open a new in-memory DuckDB connection.
    pub fn in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
            session_tag: Mutex::new(None),
        })
    }

    /// Open a DuckDB connection backed by a file on disk.
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
            session_tag: Mutex::new(None),
        })
    }

    /// Run arbitrary DDL/DML against the warehouse, used by demo fixture
    /// seeding (sem-cli). Not part of the `Warehouse` trait: the semantic
    /// layer itself only ever issues read-only SELECTs.
    pub fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(sql).map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    fn query_sync(&self, sql: &str) -> DbResult<QueryOutcome> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(sql).map_err(|e| DbError::ExecutionError(format!("{e}: {sql}")))?;
        let column_count = stmt.column_count();
        let column_names: Vec<String> = (0..column_count)
            .map(|i| stmt.column_name(i).map(|s| s.to_string()).unwrap_or_else(|_| format!("column_{i}")))
            .collect();

        let mut rows_iter = stmt.query([]).map_err(|e| DbError::ExecutionError(e.to_string()))?;
        let mut rows = Vec::new();
        while let Some(row) = rows_iter.next().map_err(|e| DbError::ExecutionError(e.to_string()))? {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let value: duckdb::types::Value = row.get(i).map_err(|e| DbError::ExecutionError(e.to_string()))?;
                values.push(duckdb_value_to_json(&value));
            }
            rows.push(values);
        }

        let columns = column_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| ColumnMeta {
                name,
                r#type: rows.first().and_then(|r| r.get(i)).map(json_type_name).unwrap_or_else(|| "unknown".to_string()),
            })
            .collect();

        log::debug!("duckdb query returned {} row(s)", rows.len());

        Ok(QueryOutcome {
            rows,
            columns,
            query_id: Some(uuid::Uuid::new_v4().to_string()),
        })
    }
}

#[async_trait]
impl Warehouse for DuckDbWarehouse {
    async fn execute(&self, sql: &str) -> DbResult<QueryOutcome> {
        self.query_sync(sql)
    }

    async fn explain(&self, sql: &str) -> DbResult<String> {
        let outcome = self.query_sync(&format!("EXPLAIN {sql}"))?;
        let lines: Vec<String> = outcome
            .rows
            .iter()
            .map(|row| row.iter().map(json_value_to_plain_string).collect::<Vec<_>>().join(" | "))
            .collect();
        Ok(lines.join("\n"))
    }

    async fn cancel(&self, _query_id: &str) -> DbResult<()> {
        Err(DbError::NotImplemented(
            "the embedded DuckDB backend executes synchronously and has no in-flight query to cancel".to_string(),
        ))
    }

    fn set_session_tag(&self, tag: &str) {
        *self.session_tag.lock().unwrap() = Some(tag.to_string());
    }

    fn warehouse_type(&self) -> &'static str {
        "duckdb"
    }
}

fn duckdb_value_to_json(value: &duckdb::types::Value) -> serde_json::Value {
    use duckdb::types::Value as V;
    match value {
        V::Null => serde_json::Value::Null,
        V::Boolean(b) => serde_json::Value::Bool(*b),
        V::Int(i) => serde_json::Value::from(*i),
        V::BigInt(i) => serde_json::Value::from(*i),
        V::Double(f) => serde_json::Number::from_f64(*f).map(serde_json::Value::Number).unwrap_or(serde_json::Value::Null),
        V::Text(s) => serde_json::Value::String(s.clone()),
        other => serde_json::Value::String(format!("{other:?}")),
    }
}

fn json_type_name(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
    .to_string()
}

fn json_value_to_plain_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_reports_its_warehouse_type() {
        let db = DuckDbWarehouse::in_memory().unwrap();
        assert_eq!(db.warehouse_type(), "duckdb");
    }

    #[tokio::test]
    async fn executes_a_simple_select() {
        let db = DuckDbWarehouse::in_memory().unwrap();
        let outcome = db.execute("SELECT 1 AS id, 'hello' AS name").await.unwrap();
        assert_eq!(outcome.columns.len(), 2);
        assert_eq!(outcome.columns[0].name, "id");
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0][1], serde_json::Value::String("hello".to_string()));
        assert!(outcome.query_id.is_some());
    }

    #[tokio::test]
    async fn executes_against_a_seeded_table() {
        let db = DuckDbWarehouse::in_memory().unwrap();
        db.execute_batch("CREATE TABLE nums AS SELECT * FROM range(5) t(n)").unwrap();
        let outcome = db.execute("SELECT n FROM nums ORDER BY n").await.unwrap();
        assert_eq!(outcome.rows.len(), 5);
    }

    #[tokio::test]
    async fn explain_returns_a_nonempty_plan() {
        let db = DuckDbWarehouse::in_memory().unwrap();
        let plan = db.explain("SELECT 1").await.unwrap();
        assert!(!plan.trim().is_empty());
    }

    #[tokio::test]
    async fn cancel_is_not_supported_by_the_embedded_backend() {
        let db = DuckDbWarehouse::in_memory().unwrap();
        assert!(db.cancel("some-id").await.is_err());
    }

    #[tokio::test]
    async fn session_tag_does_not_affect_execution() {
        let db = DuckDbWarehouse::in_memory().unwrap();
        db.set_session_tag("request-123");
        let outcome = db.execute("SELECT 1 AS id").await.unwrap();
        assert_eq!(outcome.rows.len(), 1);
    }
}
