//! sem-guard — the Execution Guard (§4.6): preflight, statement timeout,
//! retries, a process-wide circuit breaker, a bounded result cache, and
//! classifier-driven auto-repair around a `sem_db::Warehouse`.

pub mod breaker;
pub mod cache;
pub mod classifier;
pub mod cost;
pub mod error;
pub mod guard;
pub mod outcome;
pub mod repair;

pub use breaker::CircuitBreaker;
pub use cache::ResultCache;
pub use classifier::{classify, ErrorClass};
pub use cost::{estimate_cost, CostEstimate};
pub use error::{GuardError, GuardResult};
pub use guard::ExecutionGuard;
pub use outcome::{ExecutionFailure, ExecutionOutcome};
pub use repair::{attempt_repair, RepairContext, RepairOutcome};
