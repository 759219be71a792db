//! Resolves `{CUBE}.FIELD`, `{FIELD}`, and `{ENTITY.FIELD}` tokens in an SQL
//! field expression against the semantic model.

use crate::error::{MacroError, MacroResult};
use regex::Regex;
use sem_core::entity::Entity;
use sem_core::registry::EntityRegistry;
use sem_core::sql_utils::quote_ident;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Matches a `{...}` token, optionally followed by a `.FIELD` suffix for the
/// `{CUBE}.FIELD` form.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]+)\}(\.[A-Za-z_][A-Za-z0-9_]*)?").unwrap());

/// `{CUBE}.COL` — the field name lives outside the braces.
static SIMPLE_CUBE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\{\s*cube\s*\}\.([A-Za-z_][A-Za-z0-9_]*)$").unwrap());

/// `{ENTITY.COL}` — entity and field both live inside the braces.
static SIMPLE_ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{\s*([A-Za-z_][A-Za-z0-9_]*)\.([A-Za-z_][A-Za-z0-9_]*)\s*\}$").unwrap());

/// Per-request context the expander resolves tokens against.
pub struct ExpandContext<'a> {
    /// The entity a bare `{FIELD}`/`{CUBE}.FIELD` token resolves within.
    pub current_entity: String,
    /// Entity name -> table alias, as produced by the join planner.
    pub alias_by_entity: HashMap<String, String>,
    /// The loaded entities available to this request.
    pub registry: &'a EntityRegistry,
}

/// Resolve every macro token in `expr` against `ctx`, recursively expanding
/// referenced dimensions and detecting cyclic expansion.
pub fn expand(expr: &str, ctx: &ExpandContext) -> MacroResult<String> {
    let mut stack = Vec::new();
    expand_in(expr, &ctx.current_entity, ctx, &mut stack)
}

fn expand_in(
    expr: &str,
    current_entity: &str,
    ctx: &ExpandContext,
    stack: &mut Vec<String>,
) -> MacroResult<String> {
    let mut out = String::with_capacity(expr.len());
    let mut last_end = 0;

    for caps in TOKEN_RE.captures_iter(expr) {
        let whole = caps.get(0).unwrap();
        out.push_str(&expr[last_end..whole.start()]);

        let brace_inner = caps.get(1).unwrap().as_str().trim();
        let dotted_suffix = caps.get(2).map(|m| m.as_str().trim_start_matches('.'));

        let (entity_name, field_name) = resolve_token_entity_field(brace_inner, dotted_suffix, current_entity, ctx)?;

        let replacement = resolve_field(&entity_name, &field_name, ctx, stack)?;
        out.push_str(&replacement);
        last_end = whole.end();
    }
    out.push_str(&expr[last_end..]);
    Ok(out)
}

/// Split a token into its (entity, field) pair per the three token forms.
fn resolve_token_entity_field(
    brace_inner: &str,
    dotted_suffix: Option<&str>,
    current_entity: &str,
    ctx: &ExpandContext,
) -> MacroResult<(String, String)> {
    if let Some(field) = dotted_suffix {
        // `{CUBE}.FIELD` (or, leniently, `{ENTITY}.FIELD`).
        if brace_inner.eq_ignore_ascii_case("cube") {
            return Ok((current_entity.to_string(), field.to_string()));
        }
        if ctx.alias_by_entity.contains_key(brace_inner) {
            return Ok((brace_inner.to_string(), field.to_string()));
        }
        return Err(MacroError::UnknownEntity {
            entity: brace_inner.to_string(),
        });
    }

    if let Some((entity_part, field_part)) = brace_inner.split_once('.') {
        // `{ENTITY.FIELD}`.
        let entity_resolved = if entity_part.eq_ignore_ascii_case("cube") {
            current_entity
        } else {
            entity_part
        };
        if entity_resolved != current_entity && !ctx.alias_by_entity.contains_key(entity_resolved) {
            return Err(MacroError::UnknownEntity {
                entity: entity_resolved.to_string(),
            });
        }
        return Ok((entity_resolved.to_string(), field_part.to_string()));
    }

    // `{FIELD}` — same as `{CUBE}.FIELD`.
    Ok((current_entity.to_string(), brace_inner.to_string()))
}

fn resolve_field(
    entity_name: &str,
    field_name: &str,
    ctx: &ExpandContext,
    stack: &mut Vec<String>,
) -> MacroResult<String> {
    let entity = ctx.registry.get(entity_name).ok_or_else(|| MacroError::UnknownEntity {
        entity: entity_name.to_string(),
    })?;

    let dimension = entity
        .dimension_or_time_by_name(field_name)
        .ok_or_else(|| MacroError::FieldNotFound {
            entity: entity_name.to_string(),
            field: field_name.to_string(),
        })?;

    let key = format!("{entity_name}.{}", dimension.name);
    if stack.contains(&key) {
        let mut path = stack.clone();
        path.push(key);
        return Err(MacroError::CyclicExpansion { path });
    }

    if let Some((ref_entity_token, col)) = simple_column_ref(dimension.sql.trim()) {
        let ref_entity = if ref_entity_token.eq_ignore_ascii_case("cube") {
            entity_name
        } else {
            ref_entity_token.as_str()
        };
        let alias = ctx
            .alias_by_entity
            .get(ref_entity)
            .ok_or_else(|| MacroError::UnknownEntity {
                entity: ref_entity.to_string(),
            })?;
        return Ok(format!("{alias}.{col}"));
    }

    stack.push(key);
    let expanded = expand_in(&dimension.sql, entity_name, ctx, stack);
    stack.pop();
    expanded
}

/// If `sql` is an exact, single column reference (`{CUBE}.COL` or
/// `{ENTITY.COL}`), return `(entity_token, col)`.
fn simple_column_ref(sql: &str) -> Option<(String, String)> {
    if let Some(caps) = SIMPLE_CUBE_RE.captures(sql) {
        return Some(("CUBE".to_string(), caps.get(1).unwrap().as_str().to_string()));
    }
    if let Some(caps) = SIMPLE_ENTITY_RE.captures(sql) {
        return Some((
            caps.get(1).unwrap().as_str().to_string(),
            caps.get(2).unwrap().as_str().to_string(),
        ));
    }
    None
}

/// Qualify a field's `sql` as `alias."COL"` for use in a JOIN predicate.
///
/// Unlike [`expand`], this requires the field to resolve to an exact,
/// single `{CUBE}.COL` (or `{ENTITY.COL}`) token — no recursive expansion.
pub fn qualify_simple_column(entity: &Entity, entity_alias: &str, field_name: &str) -> MacroResult<String> {
    let dimension = entity
        .dimension_or_time_by_name(field_name)
        .ok_or_else(|| MacroError::FieldNotFound {
            entity: entity.name.clone(),
            field: field_name.to_string(),
        })?;

    let (_, col) = simple_column_ref(dimension.sql.trim()).ok_or_else(|| MacroError::NotASimpleColumn {
        entity: entity.name.clone(),
        field: field_name.to_string(),
    })?;
    Ok(format!("{entity_alias}.{}", quote_ident(&col)))
}

#[cfg(test)]
#[path = "expander_test.rs"]
mod tests;
