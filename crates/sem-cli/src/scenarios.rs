//! Canned `FinalizedPlan`s standing in for a Planning phase that, per
//! §4.9, requires a live LLM and is therefore not exercised by this CLI.
//! Planning's own tool-dispatch loop is exercised instead by
//! `sem_agent::llm`'s `ScriptedLlmClient`, in that crate's tests.

use sem_core::entity::Relationship;
use sem_core::plan::{FinalizedPlan, Intent, JoinGraphEdge, JoinGraphOn, TimeRange};

/// Every scenario name `run` accepts, in declaration order.
pub const SCENARIO_NAMES: &[&str] = &["new-accounts-by-region", "balance-by-owner-segment", "active-owners"];

/// Resolve a scenario name to its `FinalizedPlan`, or `None` if unknown.
pub fn by_name(name: &str) -> Option<FinalizedPlan> {
    match name {
        "new-accounts-by-region" => Some(new_accounts_by_region()),
        "balance-by-owner-segment" => Some(balance_by_owner_segment()),
        "active-owners" => Some(active_owners()),
        _ => None,
    }
}

/// Single-entity scenario: new accounts opened per region over a quarter.
fn new_accounts_by_region() -> FinalizedPlan {
    FinalizedPlan {
        intent: Intent {
            metrics: vec!["new_accounts".to_string()],
            dimensions: vec!["region".to_string()],
            time_range: Some(TimeRange {
                start: "2026-01-01".to_string(),
                end: "2026-04-01".to_string(),
                grain: Some("day".to_string()),
            }),
            ..Intent::default()
        },
        selected_entities: vec!["accounts".to_string()],
        required_fields: vec!["region".to_string(), "new_accounts".to_string()],
        assumptions: vec!["quarter is calendar Q1 2026".to_string()],
        risks: Vec::new(),
        join_graph: Vec::new(),
    }
}

/// Two-entity scenario: total account balance grouped by owner segment,
/// exercising the join planner and the many-to-one join renderer path.
fn balance_by_owner_segment() -> FinalizedPlan {
    FinalizedPlan {
        intent: Intent {
            metrics: vec!["total_balance_usd".to_string()],
            dimensions: vec!["owners.segment".to_string()],
            ..Intent::default()
        },
        selected_entities: vec!["accounts".to_string(), "owners".to_string()],
        required_fields: vec!["owners.segment".to_string(), "total_balance_usd".to_string()],
        assumptions: Vec::new(),
        risks: vec!["accounts without an owner are dropped by the left join".to_string()],
        join_graph: vec![JoinGraphEdge {
            from: "accounts".to_string(),
            to: "owners".to_string(),
            on: JoinGraphOn {
                from: "owner_id".to_string(),
                to: "id".to_string(),
            },
            relationship: Relationship::ManyToOne,
        }],
    }
}

/// Single-entity scenario with a structured filter, exercising the
/// predicate renderer independently of any join.
fn active_owners() -> FinalizedPlan {
    use sem_core::plan::{FilterOperator, StructuredFilter};

    FinalizedPlan {
        intent: Intent {
            metrics: vec!["active_owners".to_string()],
            dimensions: vec!["segment".to_string()],
            structured_filters: vec![StructuredFilter {
                field: "segment".to_string(),
                operator: FilterOperator::NotIn,
                values: vec!["churned".to_string()],
            }],
            ..Intent::default()
        },
        selected_entities: vec!["owners".to_string()],
        required_fields: vec!["segment".to_string(), "active_owners".to_string()],
        assumptions: Vec::new(),
        risks: Vec::new(),
        join_graph: Vec::new(),
    }
}
