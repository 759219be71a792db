//! The Execution phase's `estimate_cost` tool: summed heuristic signals
//! over an `EXPLAIN` plan, scored 0-100 with recommendations (§4.7).

use serde::{Deserialize, Serialize};

/// A cost estimate derived from a warehouse `EXPLAIN` plan's text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostEstimate {
    /// 0 (prohibitively expensive) to 100 (cheap); starts at 100 and loses
    /// points per heuristic signal found in the plan.
    pub score: u8,
    pub recommendations: Vec<String>,
}

struct Signal {
    needle: &'static str,
    penalty: u8,
    recommendation: &'static str,
}

/// Heuristic signals over DuckDB `EXPLAIN` plan text. Matched
/// case-insensitively; each match subtracts its penalty once, regardless
/// of how many times the signal appears.
const SIGNALS: &[Signal] = &[
    Signal {
        needle: "cross_product",
        penalty: 40,
        recommendation: "plan includes a cross product; add a join condition between the joined entities",
    },
    Signal {
        needle: "cross join",
        penalty: 40,
        recommendation: "plan includes a cross join; add a join condition between the joined entities",
    },
    Signal {
        needle: "seq_scan",
        penalty: 10,
        recommendation: "plan includes a sequential scan; consider a narrower time range or structured filter",
    },
    Signal {
        needle: "hash_join",
        penalty: 5,
        recommendation: "plan includes a hash join; verify the join key is selective",
    },
];

/// An operator count above this many lines costs extra points for plan
/// complexity, independent of which operators they are.
const COMPLEXITY_THRESHOLD: usize = 12;
const COMPLEXITY_PENALTY: u8 = 15;

pub fn estimate_cost(explain_plan: &str) -> CostEstimate {
    let lowered = explain_plan.to_lowercase();
    let mut score: i32 = 100;
    let mut recommendations = Vec::new();

    for signal in SIGNALS {
        if lowered.contains(signal.needle) {
            score -= signal.penalty as i32;
            recommendations.push(signal.recommendation.to_string());
        }
    }

    let operator_lines = explain_plan.lines().filter(|line| !line.trim().is_empty()).count();
    if operator_lines > COMPLEXITY_THRESHOLD {
        score -= COMPLEXITY_PENALTY as i32;
        recommendations.push(format!(
            "plan has {operator_lines} operator line(s), above the {COMPLEXITY_THRESHOLD}-line complexity threshold"
        ));
    }

    CostEstimate {
        score: score.clamp(0, 100) as u8,
        recommendations,
    }
}

#[cfg(test)]
#[path = "cost_test.rs"]
mod tests;
