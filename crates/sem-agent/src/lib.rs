//! sem-agent — the Phase Orchestrator (§4.7): a state machine driving the
//! LLM tool-calling loop through Planning, Building, Execution, and
//! Reporting, enforcing per-phase tool allow-lists and a hard step ceiling.

pub mod error;
pub mod llm;
pub mod phase;
pub mod state;
pub mod transport;

pub use error::{OrchestratorError, OrchestratorResult};
pub use llm::{LlmClient, ScriptedLlmClient, ToolCall};
pub use phase::Phase;
pub use state::{OrchestratorState, StepOutcome, StepRecord, TerminationReason};
pub use transport::{TransportEvent, TransportEventKind};
