//! The Reporting phase's `format_results` tool: CSV bytes, a small preview,
//! and a truncation flag (§4.7, §9 "CSV encoding").

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sem_core::execution_result::ExecutionResult;
use serde::{Deserialize, Serialize};

/// Only the first 1000 rows are CSV-encoded; the preview is the first 30
/// of those. Total row count is reported separately so truncation is
/// never silent (§9).
const CSV_ROW_LIMIT: usize = 1000;
const PREVIEW_ROW_LIMIT: usize = 30;

/// The formatted artifact handed to Reporting's narrative step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedResult {
    /// Base64 over UTF-8 CSV bytes, header row plus up to 1000 data rows.
    pub csv_base64: String,
    /// The first 30 rows of the CSV-encoded set, as plain strings.
    pub preview: Vec<Vec<String>>,
    /// Total rows in the underlying result, independent of CSV truncation.
    pub total_rows: usize,
    /// Whether the CSV omits rows the result actually had.
    pub csv_truncated: bool,
}

pub fn format_results(result: &ExecutionResult) -> FormattedResult {
    let total_rows = result.rows.len();
    let encoded_rows = &result.rows[..total_rows.min(CSV_ROW_LIMIT)];

    let mut csv = String::new();
    csv.push_str(&result.columns.iter().map(|c| csv_escape(&c.name)).collect::<Vec<_>>().join(","));
    csv.push('\n');
    for row in encoded_rows {
        let cells: Vec<String> = row.iter().map(json_to_csv_cell).collect();
        csv.push_str(&cells.iter().map(|c| csv_escape(c)).collect::<Vec<_>>().join(","));
        csv.push('\n');
    }

    let preview: Vec<Vec<String>> = encoded_rows
        .iter()
        .take(PREVIEW_ROW_LIMIT)
        .map(|row| row.iter().map(json_to_csv_cell).collect())
        .collect();

    FormattedResult {
        csv_base64: BASE64.encode(csv.as_bytes()),
        preview,
        total_rows,
        csv_truncated: total_rows > CSV_ROW_LIMIT,
    }
}

fn json_to_csv_cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Quote a CSV field if it contains a comma, quote, or newline, doubling
/// any embedded quotes.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
