//! The orchestrator's step-by-step state machine (§4.7).

use crate::error::{OrchestratorError, OrchestratorResult};
use crate::phase::Phase;
use serde::{Deserialize, Serialize};

/// Why the orchestrator stopped driving the tool-calling loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Reporting finished normally via `finalize_report`.
    ReportComplete,
    /// Planning decided there is no data to answer the request.
    NoData,
    /// Planning decided the request needs clarification from the user.
    ClarificationNeeded,
    /// A fatal Semantic Store or Validator failure ended the run immediately.
    FatalError(String),
    /// The hard step ceiling was reached before Reporting completed.
    StepCeilingExceeded,
}

/// A single tool invocation the orchestrator allowed and recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub phase: Phase,
    pub tool_name: String,
}

/// The result of recording one step against the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The tool fired but did not end its phase; still in `phase`.
    Continued { phase: Phase },
    /// The tool was a phase's terminal tool; the machine advanced to `phase`.
    Advanced { phase: Phase },
    /// The run ended, for the given reason.
    Terminated { reason: TerminationReason },
}

/// Drives the LLM tool-calling loop through Planning, Building, Execution,
/// and Reporting, enforcing each phase's tool allow-list and a hard step
/// ceiling, per §4.7.
#[derive(Debug, Clone)]
pub struct OrchestratorState {
    phase: Phase,
    step_ceiling: u32,
    steps: Vec<StepRecord>,
    termination: Option<TerminationReason>,
}

impl OrchestratorState {
    pub fn new(step_ceiling: u32) -> Self {
        Self {
            phase: Phase::Planning,
            step_ceiling,
            steps: Vec::new(),
            termination: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn is_terminated(&self) -> bool {
        self.termination.is_some()
    }

    pub fn termination_reason(&self) -> Option<&TerminationReason> {
        self.termination.as_ref()
    }

    /// Records a tool call. Rejects the call if the tool is not in the
    /// current phase's allow-list, or if the run already terminated.
    /// Otherwise advances the phase (or terminates the run) if the tool
    /// was a terminal or early-exit tool.
    pub fn record_step(&mut self, tool_name: &str) -> OrchestratorResult<StepOutcome> {
        if self.is_terminated() {
            return Err(OrchestratorError::AlreadyTerminated);
        }

        if self.steps.len() as u32 >= self.step_ceiling {
            let reason = TerminationReason::StepCeilingExceeded;
            self.termination = Some(reason.clone());
            return Ok(StepOutcome::Terminated { reason });
        }

        if !self.phase.tool_allow_list().contains(&tool_name) {
            return Err(OrchestratorError::ToolNotAllowedInPhase {
                phase: self.phase,
                tool_name: tool_name.to_string(),
            });
        }

        self.steps.push(StepRecord {
            phase: self.phase,
            tool_name: tool_name.to_string(),
        });

        if self.phase == Phase::Planning {
            if tool_name == "finalize_no_data" {
                let reason = TerminationReason::NoData;
                self.termination = Some(reason.clone());
                return Ok(StepOutcome::Terminated { reason });
            }
            if tool_name == "clarify_intent" {
                let reason = TerminationReason::ClarificationNeeded;
                self.termination = Some(reason.clone());
                return Ok(StepOutcome::Terminated { reason });
            }
        }

        if tool_name != self.phase.terminal_tool() {
            return Ok(StepOutcome::Continued { phase: self.phase });
        }

        match self.phase.next() {
            Some(next_phase) => {
                log::debug!("orchestrator advancing {} -> {next_phase} after '{tool_name}'", self.phase);
                self.phase = next_phase;
                Ok(StepOutcome::Advanced { phase: next_phase })
            }
            None => {
                let reason = TerminationReason::ReportComplete;
                self.termination = Some(reason.clone());
                Ok(StepOutcome::Terminated { reason })
            }
        }
    }

    /// Ends the run immediately for a fatal Semantic Store or Validator
    /// failure, bypassing the normal phase-advance step recording (§4.7, §7).
    pub fn fail_fatal(&mut self, reason: impl Into<String>) {
        if !self.is_terminated() {
            self.termination = Some(TerminationReason::FatalError(reason.into()));
        }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
