//! The Phase transport contract (§6): the event shape a live LLM session
//! would stream to a caller. The CLI has no network transport to stream
//! over, but builds these events from each `StepOutcome` so the wire shape
//! exists and is exercised independent of any particular caller.

use crate::state::{StepOutcome, TerminationReason};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One event in the phase transport stream: `{type, toolName?, input?,
/// output?, delta?, error?}` per §6, flattened onto a single struct so
/// serialization always emits the same field set (absent fields as null).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransportEvent {
    #[serde(rename = "type")]
    pub kind: TransportEventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Event types named in §6: tool input/output availability, reasoning and
/// text deltas, step boundaries, and a terminal `done`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransportEventKind {
    ToolInput,
    ToolOutput,
    ReasoningDelta,
    TextDelta,
    StepBoundary,
    Done,
}

impl TransportEvent {
    pub fn tool_input(tool_name: &str, input: Value) -> Self {
        Self { kind: TransportEventKind::ToolInput, tool_name: Some(tool_name.to_string()), input: Some(input), output: None, delta: None, error: None }
    }

    pub fn tool_output(tool_name: &str, output: Value) -> Self {
        Self { kind: TransportEventKind::ToolOutput, tool_name: Some(tool_name.to_string()), input: None, output: Some(output), delta: None, error: None }
    }

    pub fn step_boundary(tool_name: &str) -> Self {
        Self { kind: TransportEventKind::StepBoundary, tool_name: Some(tool_name.to_string()), input: None, output: None, delta: None, error: None }
    }

    /// Builds the terminal `done` event for a `StepOutcome::Terminated`,
    /// carrying the termination reason as `error` when it was a failure.
    pub fn done(reason: &TerminationReason) -> Self {
        let error = match reason {
            TerminationReason::FatalError(message) => Some(message.clone()),
            TerminationReason::StepCeilingExceeded => Some("step ceiling exceeded".to_string()),
            TerminationReason::NoData | TerminationReason::ClarificationNeeded | TerminationReason::ReportComplete => None,
        };
        Self { kind: TransportEventKind::Done, tool_name: None, input: None, output: None, delta: None, error }
    }

    /// Derives the step-boundary-or-terminal event a `StepOutcome` implies.
    /// `Continued`/`Advanced` both surface as a step boundary; only
    /// `Terminated` produces `done`.
    pub fn from_outcome(tool_name: &str, outcome: &StepOutcome) -> Self {
        match outcome {
            StepOutcome::Continued { .. } | StepOutcome::Advanced { .. } => Self::step_boundary(tool_name),
            StepOutcome::Terminated { reason } => Self::done(reason),
        }
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
