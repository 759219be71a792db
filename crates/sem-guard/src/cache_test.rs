use super::*;
use sem_core::execution_result::{ColumnMeta, RepairMeta};

fn sample(id: i64) -> ExecutionResult {
    ExecutionResult {
        rows: vec![vec![serde_json::Value::from(id)]],
        columns: vec![ColumnMeta {
            name: "id".to_string(),
            r#type: "number".to_string(),
        }],
        last_query_id: None,
        execution_time_ms: 1,
        truncated: false,
        repair: RepairMeta::default(),
        from_cache: false,
    }
}

#[test]
fn miss_on_an_empty_cache() {
    let cache = ResultCache::new(10, 300_000);
    assert!(cache.get("SELECT 1").is_none());
}

#[test]
fn hit_returns_a_clone_flagged_from_cache() {
    let cache = ResultCache::new(10, 300_000);
    cache.insert("SELECT 1".to_string(), sample(1));
    let hit = cache.get("SELECT 1").unwrap();
    assert!(hit.from_cache);
    assert_eq!(hit.rows[0][0], serde_json::Value::from(1));
}

#[test]
fn expired_entries_miss_on_lookup() {
    let cache = ResultCache::new(10, 0);
    cache.insert("SELECT 1".to_string(), sample(1));
    assert!(cache.get("SELECT 1").is_none());
}

#[test]
fn oldest_entry_is_evicted_once_over_capacity() {
    let cache = ResultCache::new(2, 300_000);
    cache.insert("a".to_string(), sample(1));
    cache.insert("b".to_string(), sample(2));
    cache.insert("c".to_string(), sample(3));
    assert!(cache.get("a").is_none());
    assert!(cache.get("b").is_some());
    assert!(cache.get("c").is_some());
}

#[test]
fn reinserting_an_existing_key_does_not_grow_the_order_queue() {
    let cache = ResultCache::new(2, 300_000);
    cache.insert("a".to_string(), sample(1));
    cache.insert("a".to_string(), sample(2));
    cache.insert("b".to_string(), sample(3));
    assert!(cache.get("a").is_some(), "a should not have been pushed out by its own reinsertion");
}
