use super::*;
use sem_core::entity::Entity;

fn accounts_entity() -> Entity {
    Entity::from_yaml(
        r#"
name: accounts
table: analytics.accounts
grain: g
dimensions:
  - name: tier
    sql: "{CUBE}.account_tier"
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

fn aliases() -> HashMap<String, String> {
    HashMap::from([("accounts".to_string(), "t0".to_string()), ("owners".to_string(), "t1".to_string())])
}

#[test]
fn qualifies_a_dotted_entity_field_identifier() {
    let alias_by_entity = aliases();
    let reg = registry();
    let ctx = RepairContext { registry: &reg, alias_by_entity: &alias_by_entity };
    let replacement = qualify_dotted_identifier("accounts.tier", &ctx).unwrap();
    assert_eq!(replacement, "t0.\"tier\"");
}

#[test]
fn fuzzy_matches_a_misspelled_dimension_name() {
    let alias_by_entity = aliases();
    let reg = registry();
    let ctx = RepairContext { registry: &reg, alias_by_entity: &alias_by_entity };
    let (alias, name) = fuzzy_match_dimension("teir", &ctx).unwrap();
    assert_eq!(alias, "t0");
    assert_eq!(name, "tier");
}

#[test]
fn fuzzy_match_rejects_a_distance_beyond_the_threshold() {
    let alias_by_entity = aliases();
    let reg = registry();
    let ctx = RepairContext { registry: &reg, alias_by_entity: &alias_by_entity };
    assert!(fuzzy_match_dimension("zzzzzzzzzz", &ctx).is_none());
}

#[test]
fn column_not_found_repair_substitutes_the_dotted_identifier() {
    let alias_by_entity = aliases();
    let reg = registry();
    let ctx = RepairContext { registry: &reg, alias_by_entity: &alias_by_entity };
    let outcome = repair_column_not_found("SELECT accounts.tier FROM t0", &["accounts.tier".to_string()], &ctx).unwrap();
    assert_eq!(outcome.sql, "SELECT t0.\"tier\" FROM t0");
}

#[test]
fn ambiguous_column_repair_qualifies_the_unique_owner() {
    let alias_by_entity = aliases();
    let reg = registry();
    let ctx = RepairContext { registry: &reg, alias_by_entity: &alias_by_entity };
    let outcome = repair_ambiguous_column("SELECT region FROM t0 JOIN t1", &["region".to_string()], &ctx).unwrap();
    assert_eq!(outcome.sql, "SELECT t1.\"region\" FROM t0 JOIN t1");
}

#[test]
fn ambiguous_column_repair_skips_a_name_with_no_unique_owner() {
    // `tier` is unique to accounts here too, but an unknown field has no owner at all.
    let alias_by_entity = aliases();
    let reg = registry();
    let ctx = RepairContext { registry: &reg, alias_by_entity: &alias_by_entity };
    assert!(repair_ambiguous_column("SELECT ghost FROM t0", &["ghost".to_string()], &ctx).is_none());
}

#[test]
fn timeout_repair_appends_limit_when_missing() {
    let outcome = repair_timeout("SELECT 1 FROM t0");
    assert!(outcome.sql.contains("LIMIT 1001"));
}

#[test]
fn timeout_repair_drops_a_trailing_order_by() {
    let outcome = repair_timeout("SELECT 1 FROM t0 ORDER BY 1");
    assert!(!outcome.sql.to_uppercase().contains("ORDER BY"));
    assert!(outcome.sql.contains("LIMIT 1001"));
}

#[test]
fn timeout_repair_always_returns_a_candidate_even_with_nothing_to_change() {
    let outcome = repair_timeout("SELECT 1 FROM t0 LIMIT 10");
    assert_eq!(outcome.sql, "SELECT 1 FROM t0 LIMIT 10");
}

#[test]
fn word_boundary_replacement_skips_string_literals() {
    let result = replace_word_outside_string_literals("SELECT tier, 'tier' AS label FROM t0", "tier", "t0.\"tier\"");
    assert_eq!(result, "SELECT t0.\"tier\", 'tier' AS label FROM t0");
}

#[test]
fn attempt_repair_dispatches_by_class() {
    let alias_by_entity = aliases();
    let reg = registry();
    let ctx = RepairContext { registry: &reg, alias_by_entity: &alias_by_entity };
    assert!(attempt_repair(&ErrorClass::Opaque, "SELECT 1", &ctx).is_none());
    assert!(attempt_repair(&ErrorClass::Timeout, "SELECT 1", &ctx).is_some());
}
