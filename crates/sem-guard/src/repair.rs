//! Repair strategies driven by `ErrorClass` (§4.6.2).

use crate::classifier::ErrorClass;
use regex::Regex;
use sem_core::entity::Entity;
use sem_core::registry::EntityRegistry;
use sem_core::sql_utils::quote_ident;
use std::collections::HashMap;
use std::sync::LazyLock;

static TRAILING_ORDER_BY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)\border\s+by\b.*$").unwrap());

/// The context a repair needs: the loaded entities and the alias each
/// resolved to in the rendered statement's join path.
pub struct RepairContext<'a> {
    pub registry: &'a EntityRegistry,
    pub alias_by_entity: &'a HashMap<String, String>,
}

/// A candidate repaired statement plus a human-readable reason.
pub struct RepairOutcome {
    pub sql: String,
    pub reason: String,
}

/// Dispatch to the strategy matching `class`. Unclassified errors never repair.
pub fn attempt_repair(class: &ErrorClass, sql: &str, ctx: &RepairContext) -> Option<RepairOutcome> {
    match class {
        ErrorClass::ColumnNotFound(identifiers) => repair_column_not_found(sql, identifiers, ctx),
        ErrorClass::AmbiguousColumn(identifiers) => repair_ambiguous_column(sql, identifiers, ctx),
        ErrorClass::Timeout => Some(repair_timeout(sql)),
        ErrorClass::Opaque => None,
    }
}

fn repair_column_not_found(sql: &str, identifiers: &[String], ctx: &RepairContext) -> Option<RepairOutcome> {
    let mut current = sql.to_string();
    let mut reasons = Vec::new();

    for identifier in identifiers {
        if let Some(replacement) = qualify_dotted_identifier(identifier, ctx) {
            current = replace_word_outside_string_literals(&current, identifier, &replacement);
            reasons.push(format!("qualified '{identifier}' as {replacement}"));
            continue;
        }
        if let Some((owner_alias, matched_name)) = fuzzy_match_dimension(identifier, ctx) {
            let replacement = format!("{owner_alias}.{}", quote_ident(&matched_name));
            current = replace_word_outside_string_literals(&current, identifier, &replacement);
            reasons.push(format!("fuzzy-matched '{identifier}' to {replacement}"));
        }
    }

    if reasons.is_empty() {
        None
    } else {
        Some(RepairOutcome { sql: current, reason: reasons.join("; ") })
    }
}

/// `entity.field` (or `alias.field`) → `alias."field"`, using the computed
/// join path's alias assignment.
fn qualify_dotted_identifier(identifier: &str, ctx: &RepairContext) -> Option<String> {
    let (entity_or_alias, field) = identifier.split_once('.')?;
    let alias = ctx
        .alias_by_entity
        .get(entity_or_alias)
        .cloned()
        .or_else(|| ctx.alias_by_entity.values().find(|a| a.as_str() == entity_or_alias).cloned())?;
    Some(format!("{alias}.{}", quote_ident(field)))
}

/// Levenshtein-match `identifier` (or its trailing segment) against every
/// dimension name/alias across all loaded entities; accept only a unique
/// match within `min(3, ceil(0.3*len))` edit distance.
fn fuzzy_match_dimension(identifier: &str, ctx: &RepairContext) -> Option<(String, String)> {
    let needle = identifier.rsplit('.').next().unwrap_or(identifier);
    let max_distance = (3usize).min(((needle.len() as f64) * 0.3).ceil() as usize);

    let mut candidates: Vec<(String, String, usize)> = Vec::new();
    for entity in ctx.registry.entities() {
        for dim in entity.dimensions.iter().chain(entity.time_dimensions.iter()) {
            for name in std::iter::once(&dim.name).chain(dim.aliases.iter()) {
                let distance = strsim::levenshtein(needle, name);
                if distance <= max_distance {
                    candidates.push((entity.name.clone(), dim.name.clone(), distance));
                }
            }
        }
    }

    let min_distance = candidates.iter().map(|(_, _, d)| *d).min()?;
    let mut best: Vec<&(String, String, usize)> = candidates.iter().filter(|(_, _, d)| *d == min_distance).collect();
    best.dedup_by(|a, b| a.0 == b.0 && a.1 == b.1);
    if best.len() != 1 {
        return None;
    }
    let (entity_name, dim_name, _) = best.remove(0);
    let alias = ctx.alias_by_entity.get(entity_name)?;
    Some((alias.clone(), dim_name.clone()))
}

fn repair_ambiguous_column(sql: &str, identifiers: &[String], ctx: &RepairContext) -> Option<RepairOutcome> {
    let mut current = sql.to_string();
    let mut reasons = Vec::new();

    for identifier in identifiers {
        if let Some(owner) = unique_owning_entity(identifier, ctx.registry) {
            if let Some(alias) = ctx.alias_by_entity.get(&owner) {
                let replacement = format!("{alias}.{}", quote_ident(identifier));
                current = replace_word_outside_string_literals(&current, identifier, &replacement);
                reasons.push(format!("qualified ambiguous '{identifier}' to {replacement}"));
            }
        }
    }

    if reasons.is_empty() {
        None
    } else {
        Some(RepairOutcome { sql: current, reason: reasons.join("; ") })
    }
}

fn unique_owning_entity(field_name: &str, registry: &EntityRegistry) -> Option<String> {
    let owners: Vec<&Entity> = registry
        .entities()
        .filter(|e| e.dimension_or_time_by_name(field_name).is_some())
        .collect();
    match owners.len() {
        1 => Some(owners[0].name.clone()),
        _ => None,
    }
}

fn repair_timeout(sql: &str) -> RepairOutcome {
    let mut current = TRAILING_ORDER_BY_RE.replace(sql, "").trim_end().to_string();
    let mut reasons = Vec::new();
    if sql != current {
        reasons.push("dropped trailing ORDER BY".to_string());
    }
    if !current.to_uppercase().contains("LIMIT") {
        current.push_str(" LIMIT 1001");
        reasons.push("injected LIMIT 1001".to_string());
    }
    let reason = if reasons.is_empty() {
        "no applicable timeout mitigation found; resubmitted unchanged".to_string()
    } else {
        reasons.join("; ")
    };
    RepairOutcome { sql: current, reason }
}

/// Substitute word-bounded occurrences of `word` with `replacement`,
/// skipping any span inside a single-quoted string literal.
fn replace_word_outside_string_literals(sql: &str, word: &str, replacement: &str) -> String {
    let Ok(word_re) = Regex::new(&format!(r"\b{}\b", regex::escape(word))) else {
        return sql.to_string();
    };

    let mut result = String::with_capacity(sql.len());
    let mut in_literal = false;
    let mut segment_start = 0;
    let bytes = sql.as_bytes();

    for (i, &b) in bytes.iter().enumerate() {
        if b == b'\'' {
            let segment = &sql[segment_start..=i];
            if in_literal {
                result.push_str(segment);
            } else {
                result.push_str(&word_re.replace_all(&segment[..segment.len() - 1], replacement));
                result.push('\'');
            }
            in_literal = !in_literal;
            segment_start = i + 1;
        }
    }
    let tail = &sql[segment_start..];
    if in_literal {
        result.push_str(tail);
    } else {
        result.push_str(&word_re.replace_all(tail, replacement));
    }
    result
}

#[cfg(test)]
#[path = "repair_test.rs"]
mod tests;
