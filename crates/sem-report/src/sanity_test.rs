use super::*;
use sem_core::execution_result::{ColumnMeta, RepairMeta};
use serde_json::json;

fn result_with(columns: Vec<&str>, rows: Vec<Vec<serde_json::Value>>) -> ExecutionResult {
    ExecutionResult {
        rows,
        columns: columns.into_iter().map(|name| ColumnMeta { name: name.to_string(), r#type: "string".to_string() }).collect(),
        last_query_id: None,
        execution_time_ms: 5,
        truncated: false,
        repair: RepairMeta::default(),
        from_cache: false,
    }
}

#[test]
fn empty_result_has_no_findings() {
    let result = result_with(vec!["region"], vec![]);
    let report = sanity_check(&result);
    assert!(!report.has_findings());
}

#[test]
fn computes_null_rate_per_column() {
    let result = result_with(
        vec!["region"],
        vec![vec![json!("us-east")], vec![json!(null)], vec![json!(null)], vec![json!("apac")]],
    );
    let report = sanity_check(&result);
    assert_eq!(report.null_rates.get("region"), Some(&0.5));
}

#[test]
fn counts_negative_values() {
    let result = result_with(vec!["balance"], vec![vec![json!(10.0)], vec![json!(-5.0)], vec![json!(-2.0)]]);
    let report = sanity_check(&result);
    assert_eq!(report.negative_counts.get("balance"), Some(&2));
}

#[test]
fn flags_out_of_range_percentage_columns() {
    let result = result_with(vec!["conversion_rate"], vec![vec![json!(42.0)], vec![json!(150.0)]]);
    let report = sanity_check(&result);
    assert_eq!(report.implausible_percentages.len(), 1);
    assert_eq!(report.implausible_percentages[0].value, 150.0);
}

#[test]
fn does_not_flag_non_percentage_columns_outside_zero_to_hundred() {
    let result = result_with(vec!["balance_usd"], vec![vec![json!(5000.0)]]);
    let report = sanity_check(&result);
    assert!(report.implausible_percentages.is_empty());
}
