//! Predicate lowering (§4.4.2): tokenize a field name, macro-expand it, and
//! render one comparison against its operator and literal value(s).

use crate::error::{RenderError, RenderResult};
use sem_core::sql_utils::escape_sql_string;
use sem_macro::{expand, ExpandContext};

/// `in`/`not_in` take a non-empty list of values; every other operator
/// takes exactly one.
fn is_list_operator(operator: &str) -> bool {
    matches!(operator, "in" | "not_in")
}

/// Render `value` as a SQL literal: numbers verbatim, booleans `TRUE`/`FALSE`,
/// everything else a single-quoted string with embedded `'` doubled.
fn render_literal(value: &str) -> String {
    if value.eq_ignore_ascii_case("true") {
        return "TRUE".to_string();
    }
    if value.eq_ignore_ascii_case("false") {
        return "FALSE".to_string();
    }
    if value.parse::<f64>().is_ok() {
        return value.to_string();
    }
    format!("'{}'", escape_sql_string(value))
}

/// Lower one predicate: `field` is tokenized as `{field}` (a bare or dotted
/// macro token) and macro-expanded against `ctx`, then compared against
/// `operator`/`values`.
pub fn render_predicate(field: &str, operator: &str, values: &[String], ctx: &ExpandContext) -> RenderResult<String> {
    if is_list_operator(operator) {
        if values.is_empty() {
            return Err(RenderError::InvalidFilterArity { field: field.to_string() });
        }
    } else if values.len() != 1 {
        return Err(RenderError::InvalidFilterArity { field: field.to_string() });
    }

    let token = format!("{{{field}}}");
    let expr = expand(&token, ctx)?;

    let rendered = match operator {
        "in" => {
            let list = values.iter().map(|v| render_literal(v)).collect::<Vec<_>>().join(",");
            format!("{expr} IN ({list})")
        }
        "not_in" => {
            let list = values.iter().map(|v| render_literal(v)).collect::<Vec<_>>().join(",");
            format!("{expr} NOT IN ({list})")
        }
        "=" | "!=" | ">" | ">=" | "<" | "<=" => {
            format!("{expr} {operator} {}", render_literal(&values[0]))
        }
        other => return Err(RenderError::InvalidFilterArity { field: format!("{field} (unknown operator '{other}')") }),
    };
    Ok(rendered)
}

/// AND-compose a set of already-lowered predicate clauses: bare if exactly
/// one, each wrapped in its own parentheses and AND-joined if more than one.
pub fn combine_predicates(predicates: &[String]) -> Option<String> {
    match predicates.len() {
        0 => None,
        1 => Some(predicates[0].clone()),
        _ => Some(predicates.iter().map(|p| format!("({p})")).collect::<Vec<_>>().join(" AND ")),
    }
}

#[cfg(test)]
#[path = "predicate_test.rs"]
mod tests;
