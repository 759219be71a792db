//! The Reporting phase's `sanity_check` tool: null rates, negative counts,
//! and implausible-percentage flags over an `ExecutionResult` (§4.7).

use sem_core::execution_result::ExecutionResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One column flagged for looking like a percentage but carrying a value
/// outside `[0, 100]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImplausiblePercentage {
    pub column: String,
    pub value: f64,
}

/// The outcome of sanity-checking a result set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SanityReport {
    /// Fraction of rows whose value is JSON null, per column.
    pub null_rates: HashMap<String, f64>,
    /// Count of negative numeric values, per column.
    pub negative_counts: HashMap<String, usize>,
    pub implausible_percentages: Vec<ImplausiblePercentage>,
}

impl SanityReport {
    /// Whether anything worth surfacing to the narrative was found.
    pub fn has_findings(&self) -> bool {
        self.null_rates.values().any(|&rate| rate > 0.0)
            || self.negative_counts.values().any(|&count| count > 0)
            || !self.implausible_percentages.is_empty()
    }
}

/// A column name looks percentage-like if it contains one of these
/// substrings, case-insensitively.
const PERCENTAGE_HINTS: &[&str] = &["pct", "percent", "rate", "ratio"];

/// Run the sanity scan described in §4.7's Reporting tool list.
pub fn sanity_check(result: &ExecutionResult) -> SanityReport {
    let total_rows = result.rows.len();
    let mut report = SanityReport::default();

    if total_rows == 0 {
        return report;
    }

    for (col_index, column) in result.columns.iter().enumerate() {
        let mut null_count = 0usize;
        let mut negative_count = 0usize;
        let looks_like_percentage = PERCENTAGE_HINTS.iter().any(|hint| column.name.to_lowercase().contains(hint));

        for row in &result.rows {
            let Some(value) = row.get(col_index) else { continue };
            match value {
                serde_json::Value::Null => null_count += 1,
                serde_json::Value::Number(n) => {
                    if let Some(f) = n.as_f64() {
                        if f < 0.0 {
                            negative_count += 1;
                        }
                        if looks_like_percentage && !(0.0..=100.0).contains(&f) {
                            report.implausible_percentages.push(ImplausiblePercentage {
                                column: column.name.clone(),
                                value: f,
                            });
                        }
                    }
                }
                _ => {}
            }
        }

        report.null_rates.insert(column.name.clone(), null_count as f64 / total_rows as f64);
        if negative_count > 0 {
            report.negative_counts.insert(column.name.clone(), negative_count);
        }
    }

    if report.has_findings() {
        log::debug!("sanity check flagged {} implausible value(s)", report.implausible_percentages.len());
    }

    report
}

#[cfg(test)]
#[path = "sanity_test.rs"]
mod tests;
