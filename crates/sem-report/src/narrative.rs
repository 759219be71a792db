//! The Reporting phase's `explain_results` tool: a short narrative plus a
//! confidence score derived from repair history and the sanity scan.

use crate::sanity::SanityReport;
use sem_core::execution_result::ExecutionResult;
use sem_guard::ExecutionFailure;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Narrative {
    pub text: String,
    /// In `[0.0, 1.0]`; lower when the query needed repair or the sanity
    /// scan found something worth a second look.
    pub confidence: f64,
}

pub fn explain_results(result: &ExecutionResult, sanity: &SanityReport) -> Narrative {
    let mut confidence: f64 = 1.0;
    let mut notes = Vec::new();

    if result.rows.is_empty() {
        notes.push("no rows matched the request".to_string());
    } else {
        notes.push(format!("returned {} row(s)", result.rows.len()));
    }

    if result.truncated {
        notes.push("results were truncated at the row limit".to_string());
        confidence -= 0.1;
    }

    if result.repair.repaired {
        let reason = result.repair.repair_reason.as_deref().unwrap_or("an auto-repair");
        notes.push(format!("the query needed a repair ({reason})"));
        confidence -= 0.2;
    }

    if !sanity.implausible_percentages.is_empty() {
        notes.push(format!("{} column value(s) looked implausible for a percentage", sanity.implausible_percentages.len()));
        confidence -= 0.3;
    }

    let noisy_columns = sanity.null_rates.values().filter(|&&rate| rate > 0.5).count();
    if noisy_columns > 0 {
        notes.push(format!("{noisy_columns} column(s) are more than half null"));
        confidence -= 0.1 * noisy_columns as f64;
    }

    if result.from_cache {
        notes.push("served from the result cache".to_string());
    }

    Narrative {
        text: notes.join("; ") + ".",
        confidence: confidence.clamp(0.0, 1.0),
    }
}

/// The failure-shaped counterpart to `explain_results`: Reporting still
/// runs, and still produces a narrative, when execution failed after
/// exhausting retries and repair attempts (§4.7, §7).
pub fn explain_failure(failure: &ExecutionFailure) -> Narrative {
    let mut notes = vec![format!("the query failed: {}", failure.error)];

    if failure.repaired {
        let reason = failure.repair_reason.as_deref().unwrap_or("an auto-repair");
        notes.push(format!("a repair was attempted ({reason}) but did not resolve the failure"));
    } else {
        notes.push("no repair was attempted".to_string());
    }

    Narrative {
        text: notes.join("; ") + ".",
        confidence: 0.0,
    }
}

#[cfg(test)]
#[path = "narrative_test.rs"]
mod tests;
