//! The LLM client collaborator contract (§2, §6): given a phase and its
//! tool allow-list, returns the tool calls an LLM step wants to make. The
//! real implementation talks to a provider and is out of scope by contract
//! (§1) — only the contract and a scripted test stub live in this crate.

use crate::phase::Phase;
use serde_json::Value;

/// One tool call an LLM step produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub tool_name: String,
    pub input: Value,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>, input: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            input,
        }
    }
}

/// Issues tool calls for the current phase's allow-list. Implementations
/// may return zero or more calls per step; an empty result signals the
/// client has nothing further to say this step.
pub trait LlmClient {
    fn next_step(&mut self, phase: Phase, allow_list: &[&str]) -> Vec<ToolCall>;
}

/// A scripted `LlmClient`: replays one fixed tool call per step, ignoring
/// phase and allow-list, until the script is exhausted. Used to exercise a
/// real Planning tool-dispatch loop in tests without a live provider.
pub struct ScriptedLlmClient {
    script: std::collections::VecDeque<ToolCall>,
}

impl ScriptedLlmClient {
    pub fn new(script: Vec<ToolCall>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl LlmClient for ScriptedLlmClient {
    fn next_step(&mut self, _phase: Phase, _allow_list: &[&str]) -> Vec<ToolCall> {
        self.script.pop_front().into_iter().collect()
    }
}

#[cfg(test)]
#[path = "llm_test.rs"]
mod tests;
