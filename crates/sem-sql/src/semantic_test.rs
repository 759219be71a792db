use super::*;
use sem_core::entity::Entity;
use sem_core::plan::{Intent, JoinGraphEdge, JoinGraphOn, Relationship, TimeRange};
use sem_core::registry::EntityRegistry;

fn accounts_entity() -> Entity {
    Entity::from_yaml(
        r#"
name: accounts
table: analytics.accounts
grain: g
dimensions:
  - name: tier
    sql: "{CUBE}.account_tier"
time_dimensions:
  - name: created_at
    sql: "{CUBE}.created_at"
measures:
  - name: count
    calculation: count
metrics:
  - name: active_accounts
    measure: count
    anchor_date: created_at
"#,
        "accounts",
    )
    .unwrap()
}

fn owners_entity() -> Entity {
    Entity::from_yaml(
        r#"
name: owners
table: crm.owners
grain: g
dimensions:
  - name: region
    sql: "{CUBE}.region"
"#,
        "owners",
    )
    .unwrap()
}

fn registry() -> EntityRegistry {
    EntityRegistry::from_entities(vec![accounts_entity(), owners_entity()])
}

fn base_plan(selected: Vec<&str>, intent: Intent) -> FinalizedPlan {
    FinalizedPlan {
        intent,
        selected_entities: selected.into_iter().map(String::from).collect(),
        required_fields: vec![],
        assumptions: vec![],
        risks: vec![],
        join_graph: vec![],
    }
}

#[test]
fn well_formed_plan_is_ok() {
    let reg = registry();
    let config = SemanticConfig::default();
    let intent = Intent {
        dimensions: vec!["tier".to_string()],
        metrics: vec!["active_accounts".to_string()],
        ..Default::default()
    };
    let report = validate_semantic(&base_plan(vec!["accounts"], intent), &reg, &config);
    assert!(report.ok, "{:?}", report.issues);
}

#[test]
fn unqualified_table_is_flagged() {
    let bare = Entity::from_yaml("name: bare\ntable: bare_table\ngrain: g\n", "bare").unwrap();
    let reg = EntityRegistry::from_entities(vec![bare]);
    let config = SemanticConfig::default();
    let report = validate_semantic(&base_plan(vec!["bare"], Intent::default()), &reg, &config);
    assert!(report.issues.iter().any(|i| i.code == "unqualified_table"));
}

#[test]
fn schema_not_on_allow_list_is_flagged() {
    let reg = registry();
    let mut config = SemanticConfig::default();
    config.allowed_schemas = vec!["analytics".to_string()];
    let report = validate_semantic(&base_plan(vec!["accounts", "owners"], Intent::default()), &reg, &config);
    assert!(report.issues.iter().any(|i| i.code == "schema_not_allowed"));
}

#[test]
fn selected_entity_not_loaded_is_flagged() {
    let reg = registry();
    let config = SemanticConfig::default();
    let report = validate_semantic(&base_plan(vec!["ghost"], Intent::default()), &reg, &config);
    assert!(report.issues.iter().any(|i| i.code == "selected_entity_not_loaded"));
}

#[test]
fn join_graph_endpoint_not_loaded_is_flagged() {
    let reg = registry();
    let config = SemanticConfig::default();
    let mut plan = base_plan(vec!["accounts"], Intent::default());
    plan.join_graph.push(JoinGraphEdge {
        from: "accounts".to_string(),
        to: "ghost".to_string(),
        on: JoinGraphOn {
            from: "x".to_string(),
            to: "y".to_string(),
        },
        relationship: Relationship::ManyToOne,
    });
    let report = validate_semantic(&plan, &reg, &config);
    assert!(report.issues.iter().any(|i| i.code == "join_graph_endpoint_not_loaded"));
}

#[test]
fn dotted_dimension_resolves_only_against_the_named_entity() {
    let reg = registry();
    let config = SemanticConfig::default();
    let intent = Intent {
        dimensions: vec!["owners.region".to_string()],
        ..Default::default()
    };
    let report = validate_semantic(&base_plan(vec!["accounts", "owners"], intent), &reg, &config);
    assert!(report.ok, "{:?}", report.issues);

    let bad_intent = Intent {
        dimensions: vec!["owners.not_a_field".to_string()],
        ..Default::default()
    };
    let bad_report = validate_semantic(&base_plan(vec!["accounts", "owners"], bad_intent), &reg, &config);
    assert!(bad_report.issues.iter().any(|i| i.code == "dimension_not_found"));
}

#[test]
fn unresolvable_metric_is_flagged() {
    let reg = registry();
    let config = SemanticConfig::default();
    let intent = Intent {
        metrics: vec!["not_a_real_metric".to_string()],
        ..Default::default()
    };
    let report = validate_semantic(&base_plan(vec!["accounts"], intent), &reg, &config);
    assert!(report.issues.iter().any(|i| i.code == "metric_not_found"));
}

#[test]
fn time_range_without_any_time_dimension_is_flagged() {
    let reg = EntityRegistry::from_entities(vec![owners_entity()]);
    let config = SemanticConfig::default();
    let intent = Intent {
        time_range: Some(TimeRange {
            start: "2026-01-01".to_string(),
            end: "2026-02-01".to_string(),
            grain: None,
        }),
        ..Default::default()
    };
    let report = validate_semantic(&base_plan(vec!["owners"], intent), &reg, &config);
    assert!(report.issues.iter().any(|i| i.code == "no_time_dimension"));
}

#[test]
fn time_range_with_a_time_dimension_on_a_different_entity_is_ok() {
    let reg = registry();
    let config = SemanticConfig::default();
    let intent = Intent {
        time_range: Some(TimeRange {
            start: "2026-01-01".to_string(),
            end: "2026-02-01".to_string(),
            grain: None,
        }),
        ..Default::default()
    };
    let report = validate_semantic(&base_plan(vec!["accounts", "owners"], intent), &reg, &config);
    assert!(report.ok, "{:?}", report.issues);
}
