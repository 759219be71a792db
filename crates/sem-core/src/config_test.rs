use super::*;

#[test]
fn defaults_match_spec() {
    let cfg: SemanticConfig = SemanticConfig::from_yaml("name: demo\n").unwrap();
    assert_eq!(cfg.allowed_schemas, vec!["analytics", "crm", "main"]);
    assert_eq!(cfg.statement_timeout_ms, 20_000);
    assert_eq!(cfg.explain_timeout_ms, 10_000);
    assert_eq!(cfg.max_attempts, 3);
    assert_eq!(cfg.retry_base_delay_ms, 250);
    assert_eq!(cfg.breaker_threshold, 3);
    assert_eq!(cfg.breaker_cooldown_ms, 60_000);
    assert_eq!(cfg.cache_capacity, 100);
    assert_eq!(cfg.cache_ttl_ms, 300_000);
    assert_eq!(cfg.max_repair_attempts, 2);
    assert_eq!(cfg.step_ceiling, 100);
}

#[test]
fn max_attempts_is_clamped_to_five() {
    let cfg = SemanticConfig::from_yaml("name: demo\nmax_attempts: 9\n").unwrap();
    assert_eq!(cfg.max_attempts, 5);
}

#[test]
fn max_repair_attempts_is_clamped_to_two() {
    let cfg = SemanticConfig::from_yaml("name: demo\nmax_repair_attempts: 50\n").unwrap();
    assert_eq!(cfg.max_repair_attempts, 2);
}

#[test]
fn rejects_empty_name() {
    let err = SemanticConfig::from_yaml("name: \"\"\n").unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn rejects_empty_allowed_schemas() {
    let err = SemanticConfig::from_yaml("name: demo\nallowed_schemas: []\n").unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn rejects_unknown_fields() {
    let err = SemanticConfig::from_yaml("name: demo\nbogus_field: 1\n").unwrap_err();
    assert!(matches!(err, CoreError::ConfigParseError { .. }));
}

#[test]
fn load_missing_file_errors() {
    let err = SemanticConfig::load(Path::new("/nonexistent/semantic.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn load_from_dir_reads_semantic_yml() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("semantic.yml"), "name: demo\n").unwrap();
    let cfg = SemanticConfig::load_from_dir(dir.path()).unwrap();
    assert_eq!(cfg.name, "demo");
}

#[test]
fn descriptor_root_absolute_resolves_relative_paths() {
    let cfg = SemanticConfig::from_yaml("name: demo\ndescriptor_root: ents\n").unwrap();
    let base = Path::new("/tmp/project");
    assert_eq!(cfg.descriptor_root_absolute(base), base.join("ents"));
}
