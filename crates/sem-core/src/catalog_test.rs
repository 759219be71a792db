use super::*;

fn sample() -> Catalog {
    Catalog::from_yaml(
        r#"
version: "1"
entities:
  - name: accounts
    grain: one row per account
    description: Customer accounts and their tier
    example_questions:
      - "how many accounts are on the enterprise tier?"
  - name: opportunities
    grain: one row per sales opportunity
    description: Pipeline of deals
    example_questions:
      - "what is our new business ARR this quarter?"
"#,
    )
    .unwrap()
}

#[test]
fn parses_catalog() {
    let c = sample();
    assert_eq!(c.entities.len(), 2);
}

#[test]
fn rejects_empty_catalog() {
    let err = Catalog::from_yaml("version: \"1\"\nentities: []\n").unwrap_err();
    assert!(matches!(err, CoreError::CatalogInvalid { .. }));
}

#[test]
fn rejects_duplicate_entity_cards() {
    let yaml = r#"
version: "1"
entities:
  - name: accounts
    grain: g
  - name: accounts
    grain: g
"#;
    let err = Catalog::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, CoreError::CatalogInvalid { .. }));
}

#[test]
fn search_ranks_name_matches_highest() {
    let c = sample();
    let results = c.search("accounts", 5);
    assert_eq!(results[0].name, "accounts");
}

#[test]
fn search_matches_example_questions() {
    let c = sample();
    let results = c.search("ARR quarter", 5);
    assert_eq!(results[0].name, "opportunities");
}

#[test]
fn search_respects_limit() {
    let c = sample();
    let results = c.search("", 1);
    assert_eq!(results.len(), 1);
}

#[test]
fn search_with_no_matches_is_empty() {
    let c = sample();
    let results = c.search("zzzznomatch", 5);
    assert!(results.is_empty());
}
