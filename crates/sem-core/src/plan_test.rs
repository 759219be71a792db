use super::*;

fn base_plan(selected: Vec<&str>) -> FinalizedPlan {
    FinalizedPlan {
        intent: Intent::default(),
        selected_entities: selected.into_iter().map(String::from).collect(),
        required_fields: vec![],
        assumptions: vec![],
        risks: vec![],
        join_graph: vec![],
    }
}

#[test]
fn rejects_zero_selected_entities() {
    let plan = base_plan(vec![]);
    assert!(plan.validate().is_err());
}

#[test]
fn rejects_more_than_three_selected_entities() {
    let plan = base_plan(vec!["a", "b", "c", "d"]);
    assert!(plan.validate().is_err());
}

#[test]
fn accepts_one_to_three_selected_entities() {
    assert!(base_plan(vec!["a"]).validate().is_ok());
    assert!(base_plan(vec!["a", "b"]).validate().is_ok());
    assert!(base_plan(vec!["a", "b", "c"]).validate().is_ok());
}

#[test]
fn join_graph_endpoints_must_be_reachable() {
    let mut plan = base_plan(vec!["accounts"]);
    plan.join_graph.push(JoinGraphEdge {
        from: "somewhere_else".into(),
        to: "companies".into(),
        on: JoinGraphOn {
            from: "x".into(),
            to: "y".into(),
        },
        relationship: Relationship::ManyToOne,
    });
    assert!(plan.validate().is_err());
}

#[test]
fn join_graph_reachable_from_selected_is_ok() {
    let mut plan = base_plan(vec!["accounts"]);
    plan.join_graph.push(JoinGraphEdge {
        from: "accounts".into(),
        to: "companies".into(),
        on: JoinGraphOn {
            from: "company_id".into(),
            to: "id".into(),
        },
        relationship: Relationship::ManyToOne,
    });
    assert!(plan.validate().is_ok());
}

#[test]
fn structured_filter_in_requires_nonempty_values() {
    let filter = StructuredFilter {
        field: "tier".into(),
        operator: FilterOperator::In,
        values: vec![],
    };
    assert!(filter.validate().is_err());
}

#[test]
fn structured_filter_scalar_requires_exactly_one_value() {
    let filter = StructuredFilter {
        field: "tier".into(),
        operator: FilterOperator::Eq,
        values: vec!["a".into(), "b".into()],
    };
    assert!(filter.validate().is_err());

    let ok = StructuredFilter {
        field: "tier".into(),
        operator: FilterOperator::Eq,
        values: vec!["a".into()],
    };
    assert!(ok.validate().is_ok());
}

#[test]
fn operator_symbols_match_the_renderer_contract() {
    assert_eq!(FilterOperator::Eq.as_symbol(), "=");
    assert_eq!(FilterOperator::Ne.as_symbol(), "!=");
    assert_eq!(FilterOperator::In.as_symbol(), "in");
    assert_eq!(FilterOperator::NotIn.as_symbol(), "not_in");
}
