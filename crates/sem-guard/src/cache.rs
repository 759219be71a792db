//! Bounded, insertion-ordered result cache keyed by the exact original SQL
//! string (§4.6, §5).

use sem_core::execution_result::ExecutionResult;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct CacheEntry {
    result: ExecutionResult,
    inserted_at: Instant,
}

struct CacheState {
    entries: HashMap<String, CacheEntry>,
    order: VecDeque<String>,
}

/// Entries older than `ttl` expire on lookup; the map is capped at
/// `capacity`, evicting the oldest entry on insert once full.
pub struct ResultCache {
    state: Mutex<CacheState>,
    capacity: usize,
    ttl: Duration,
}

impl ResultCache {
    pub fn new(capacity: usize, ttl_ms: u64) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity: capacity.max(1),
            ttl: Duration::from_millis(ttl_ms),
        }
    }

    /// Look up the exact original SQL string. Returns a clone flagged
    /// `from_cache` so callers never mutate the cached copy in place.
    pub fn get(&self, sql: &str) -> Option<ExecutionResult> {
        let mut state = self.state.lock().unwrap();
        let expired = state.entries.get(sql)?.inserted_at.elapsed() >= self.ttl;
        if expired {
            state.entries.remove(sql);
            state.order.retain(|k| k != sql);
            return None;
        }
        let mut result = state.entries.get(sql).unwrap().result.clone();
        result.from_cache = true;
        Some(result)
    }

    /// Cache writes occur after every successful execution, keyed by the
    /// original SQL regardless of whether repair was needed.
    pub fn insert(&self, sql: String, result: ExecutionResult) {
        let mut state = self.state.lock().unwrap();
        if !state.entries.contains_key(&sql) {
            state.order.push_back(sql.clone());
        }
        state.entries.insert(sql, CacheEntry { result, inserted_at: Instant::now() });
        while state.entries.len() > self.capacity {
            let Some(oldest) = state.order.pop_front() else { break };
            state.entries.remove(&oldest);
        }
    }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
