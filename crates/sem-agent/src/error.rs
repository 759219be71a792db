//! Error types for sem-agent

use crate::phase::Phase;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    #[error("tool '{tool_name}' is not allowed in phase {phase}")]
    ToolNotAllowedInPhase { phase: Phase, tool_name: String },

    #[error("the orchestrator has already terminated")]
    AlreadyTerminated,
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
