use super::*;

#[test]
fn plain_select_is_ok() {
    let report = validate_syntax("SELECT 1 FROM t0");
    assert!(report.ok);
}

#[test]
fn single_trailing_semicolon_is_ok() {
    let report = validate_syntax("SELECT 1 FROM t0;");
    assert!(report.ok);
}

#[test]
fn multiple_semicolons_is_rejected() {
    let report = validate_syntax("SELECT 1; SELECT 2;");
    assert!(!report.ok);
    assert!(report.issues.iter().any(|i| i.code == "multiple_statements"));
}

#[test]
fn semicolon_not_at_the_end_is_rejected() {
    let report = validate_syntax("SELECT 1; FROM t0");
    assert!(!report.ok);
}

#[test]
fn disallowed_verbs_are_flagged_case_insensitively() {
    for verb in ["DROP", "drop", "Truncate", "ALTER", "CREATE", "insert", "update", "delete", "merge", "copy", "put", "get"] {
        let report = validate_syntax(&format!("{verb} something"));
        assert!(!report.ok, "expected {verb} to be rejected");
    }
}

#[test]
fn disallowed_verb_match_is_word_bounded() {
    // "dropbox_id" must not trigger on "DROP" as a substring.
    let report = validate_syntax("SELECT dropbox_id FROM t0");
    assert!(report.ok);
}

#[test]
fn balanced_block_comments_are_ok() {
    let report = validate_syntax("SELECT 1 /* comment */ FROM t0");
    assert!(report.ok);
}

#[test]
fn unbalanced_block_comment_is_rejected() {
    let report = validate_syntax("SELECT 1 /* comment FROM t0");
    assert!(!report.ok);
    assert!(report.issues.iter().any(|i| i.code == "unbalanced_comment"));
}

#[test]
fn nested_block_comments_stay_balanced() {
    let report = validate_syntax("SELECT 1 /* outer /* inner */ still outer */ FROM t0");
    assert!(report.ok);
}
