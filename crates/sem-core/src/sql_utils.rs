//! SQL identifier quoting utilities
//!
//! Provides safe quoting for SQL identifiers and qualified names so the
//! renderer never hands an unquoted user-controlled segment to the
//! warehouse.

/// Quote a SQL identifier, doubling any embedded double quotes.
///
/// # Examples
/// ```
/// use sem_core::sql_utils::quote_ident;
/// assert_eq!(quote_ident("orders"), r#""orders""#);
/// assert_eq!(quote_ident(r#"my"col"#), r#""my""col""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a potentially schema-qualified name (`schema.table` or `db.schema.table`).
///
/// # Examples
/// ```
/// use sem_core::sql_utils::quote_qualified;
/// assert_eq!(quote_qualified("analytics.accounts"), r#""analytics"."accounts""#);
/// ```
pub fn quote_qualified(name: &str) -> String {
    name.split('.').map(quote_ident).collect::<Vec<_>>().join(".")
}

/// Escape a value for use inside a single-quoted SQL string literal.
pub fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

/// Split a fully- or partially-qualified table identifier into its schema and
/// table parts. Returns `None` if the name has no schema component.
pub fn split_schema_table(table: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = table.split('.').collect();
    match parts.len() {
        2 => Some((parts[0].to_string(), parts[1].to_string())),
        3 => Some((parts[1].to_string(), parts[2].to_string())),
        _ => None,
    }
}

#[cfg(test)]
#[path = "sql_utils_test.rs"]
mod tests;
