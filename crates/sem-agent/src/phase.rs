//! The four phases of the orchestrator loop and their tool allow-lists (§4.7).

use serde::{Deserialize, Serialize};

/// One of the four phases the orchestrator drives the LLM tool-calling loop
/// through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Planning,
    Building,
    Execution,
    Reporting,
}

impl Phase {
    /// The tool roles exposed to the LLM while in this phase.
    pub fn tool_allow_list(self) -> &'static [&'static str] {
        match self {
            Phase::Planning => &[
                "list_entities",
                "search_catalog",
                "read_raw_descriptor",
                "load_entity",
                "load_entities",
                "search_schema",
                "scan_entity_properties",
                "assess_coverage",
                "finalize_plan",
                "finalize_no_data",
                "clarify_intent",
            ],
            Phase::Building => &["compute_join_path", "build_sql", "validate_sql", "finalize_build"],
            Phase::Execution => &["estimate_cost", "execute_with_repair"],
            Phase::Reporting => &["sanity_check", "format_results", "explain_results", "finalize_report"],
        }
    }

    /// The tool whose firing advances out of this phase.
    pub fn terminal_tool(self) -> &'static str {
        match self {
            Phase::Planning => "finalize_plan",
            Phase::Building => "finalize_build",
            Phase::Execution => "execute_with_repair",
            Phase::Reporting => "finalize_report",
        }
    }

    /// The phase that follows this one, or `None` once Reporting completes.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Planning => Some(Phase::Building),
            Phase::Building => Some(Phase::Execution),
            Phase::Execution => Some(Phase::Reporting),
            Phase::Reporting => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Planning => write!(f, "planning"),
            Phase::Building => write!(f, "building"),
            Phase::Execution => write!(f, "execution"),
            Phase::Reporting => write!(f, "reporting"),
        }
    }
}

#[cfg(test)]
#[path = "phase_test.rs"]
mod tests;
