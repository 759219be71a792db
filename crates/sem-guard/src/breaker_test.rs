use super::*;

#[test]
fn closed_breaker_allows_execution() {
    let breaker = CircuitBreaker::new(3, 60_000);
    assert!(!breaker.is_open());
}

#[test]
fn opens_after_reaching_the_threshold() {
    let breaker = CircuitBreaker::new(3, 60_000);
    breaker.record_failure();
    breaker.record_failure();
    assert!(!breaker.is_open());
    breaker.record_failure();
    assert!(breaker.is_open());
}

#[test]
fn success_resets_the_counter_and_closes_the_breaker() {
    let breaker = CircuitBreaker::new(3, 60_000);
    breaker.record_failure();
    breaker.record_failure();
    breaker.record_failure();
    assert!(breaker.is_open());
    breaker.record_success();
    assert!(!breaker.is_open());
    breaker.record_failure();
    breaker.record_failure();
    assert!(!breaker.is_open(), "two failures after a reset should not reopen the breaker");
}

#[test]
fn cooldown_expiry_closes_the_breaker_again() {
    let breaker = CircuitBreaker::new(1, 0);
    breaker.record_failure();
    assert!(!breaker.is_open(), "a zero-length cooldown should already have elapsed");
}
