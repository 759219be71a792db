//! Process-wide circuit breaker over consecutive execution failures (§4.6, §5).

use std::sync::Mutex;
use std::time::{Duration, Instant};

struct BreakerState {
    consecutive_failures: u32,
    tripped_until: Option<Instant>,
}

/// Three counters, serialized behind one mutex: `consecutiveFailures` and
/// `trippedUntil` from §5's concurrency model.
pub struct CircuitBreaker {
    state: Mutex<BreakerState>,
    threshold: u32,
    cooldown: Duration,
}

impl CircuitBreaker {
    pub fn new(threshold: u32, cooldown_ms: u64) -> Self {
        Self {
            state: Mutex::new(BreakerState {
                consecutive_failures: 0,
                tripped_until: None,
            }),
            threshold: threshold.max(1),
            cooldown: Duration::from_millis(cooldown_ms),
        }
    }

    /// Whether the breaker currently rejects new executions.
    pub fn is_open(&self) -> bool {
        let state = self.state.lock().unwrap();
        matches!(state.tripped_until, Some(until) if Instant::now() < until)
    }

    /// Any success resets the consecutive-failure counter and closes the breaker.
    pub fn record_success(&self) {
        let mut state = self.state.lock().unwrap();
        state.consecutive_failures = 0;
        state.tripped_until = None;
    }

    /// At `threshold` consecutive failures, trip the breaker for `cooldown`.
    pub fn record_failure(&self) {
        let mut state = self.state.lock().unwrap();
        state.consecutive_failures += 1;
        if state.consecutive_failures >= self.threshold {
            state.tripped_until = Some(Instant::now() + self.cooldown);
        }
    }
}

#[cfg(test)]
#[path = "breaker_test.rs"]
mod tests;
