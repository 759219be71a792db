//! Error classification from a driver's message string (§4.6.1).

use regex::Regex;
use std::sync::LazyLock;

static INVALID_IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)invalid identifier '([^']+)'").unwrap());
static COLUMN_NOT_FOUND_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(?i)column\s+([A-Za-z0-9_."]+)\s+not found"#).unwrap());
static QUOTED_IDENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"'([^']+)'|"([^"]+)""#).unwrap());

/// A driver error, classified per §4.6.1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorClass {
    ColumnNotFound(Vec<String>),
    AmbiguousColumn(Vec<String>),
    Timeout,
    Opaque,
}

/// Classify a driver's raw error message.
pub fn classify(message: &str) -> ErrorClass {
    let mut identifiers: Vec<String> = INVALID_IDENTIFIER_RE.captures_iter(message).map(|c| c[1].to_string()).collect();
    identifiers.extend(COLUMN_NOT_FOUND_RE.captures_iter(message).map(|c| c[1].to_string()));
    if !identifiers.is_empty() {
        return ErrorClass::ColumnNotFound(identifiers);
    }

    let lower = message.to_lowercase();
    if lower.contains("ambiguous") && lower.contains("column") {
        let identifiers: Vec<String> = QUOTED_IDENT_RE
            .captures_iter(message)
            .filter_map(|c| c.get(1).or_else(|| c.get(2)).map(|m| m.as_str().to_string()))
            .collect();
        return ErrorClass::AmbiguousColumn(identifiers);
    }

    if lower.contains("timeout") {
        return ErrorClass::Timeout;
    }

    ErrorClass::Opaque
}

#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;
