//! Static, regex-driven syntax scan (§4.5): single statement, no disallowed
//! verbs, balanced block comments.

use crate::report::{ValidationIssue, ValidationReport};
use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED_VERB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(DROP|TRUNCATE|ALTER|CREATE|INSERT|UPDATE|DELETE|MERGE|COPY|PUT|GET)\b").unwrap()
});

/// Run the syntax scan over raw SQL text.
pub fn validate_syntax(sql: &str) -> ValidationReport {
    let mut issues = Vec::new();

    check_single_statement(sql, &mut issues);
    check_disallowed_verbs(sql, &mut issues);
    check_balanced_comments(sql, &mut issues);

    ValidationReport::from_issues(issues)
}

fn check_single_statement(sql: &str, issues: &mut Vec<ValidationIssue>) {
    let trimmed = sql.trim_end();
    let semicolons = trimmed.matches(';').count();
    if semicolons > 1 || (semicolons == 1 && !trimmed.ends_with(';')) {
        issues.push(ValidationIssue::new(
            "multiple_statements",
            "SQL must contain at most one statement, terminated by at most one trailing semicolon",
        ));
    }
}

fn check_disallowed_verbs(sql: &str, issues: &mut Vec<ValidationIssue>) {
    for caps in DISALLOWED_VERB_RE.captures_iter(sql) {
        let verb = caps.get(1).unwrap().as_str().to_uppercase();
        issues.push(ValidationIssue::new(
            "disallowed_verb",
            format!("statement contains disallowed verb '{verb}'"),
        ));
    }
}

fn check_balanced_comments(sql: &str, issues: &mut Vec<ValidationIssue>) {
    let mut depth: i32 = 0;
    let bytes = sql.as_bytes();
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b'/' && bytes[i + 1] == b'*' {
            depth += 1;
            i += 2;
        } else if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            depth -= 1;
            if depth < 0 {
                break;
            }
            i += 2;
        } else {
            i += 1;
        }
    }
    if depth != 0 {
        issues.push(ValidationIssue::new("unbalanced_comment", "block comments are not balanced"));
    }
}

#[cfg(test)]
#[path = "syntax_test.rs"]
mod tests;
