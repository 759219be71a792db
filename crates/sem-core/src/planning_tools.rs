//! Planning-phase tool roles layered over the Semantic Store's bare
//! `listEntities`/`loadCatalog`/`loadEntity`/`readRaw` contract (§4.1, §4.7).
//! Catalog keyword search already lives on `Catalog::search`; this module
//! covers the remaining named Planning tool roles: raw-text schema search,
//! selective field hydration, and coverage annotation.

use crate::entity::Entity;
use std::collections::HashSet;

/// One line of a raw descriptor's text that matched a substring search.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaMatch {
    pub entity_name: String,
    pub line_number: usize,
    pub line_text: String,
}

/// Substring search over an entity's raw descriptor text, returning
/// file (entity name) + line context for every matching line.
pub fn search_schema(entity_name: &str, raw_text: &str, needle: &str) -> Vec<SchemaMatch> {
    let needle_lower = needle.to_lowercase();
    raw_text
        .lines()
        .enumerate()
        .filter(|(_, line)| line.to_lowercase().contains(&needle_lower))
        .map(|(i, line)| SchemaMatch {
            entity_name: entity_name.to_string(),
            line_number: i + 1,
            line_text: line.to_string(),
        })
        .collect()
}

/// Selective field hydration: the requested fields plus every field they
/// transitively depend on through a `sql`/`measure` expression's `{...}`
/// tokens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyScan {
    /// Every field name in the closure, including the originally requested
    /// ones.
    pub fields: Vec<String>,
}

/// A loose token scan, not a full macro expansion: finds `{TOKEN}` and
/// `{TOKEN}.FIELD` occurrences and keeps whichever part names a field
/// declared on `entity`, so the closure stays conservative rather than
/// chasing other entities' fields.
fn referenced_field_names(entity: &Entity, expr: &str) -> Vec<String> {
    let mut found = Vec::new();
    for (start, ch) in expr.char_indices() {
        if ch != '{' {
            continue;
        }
        if let Some(end) = expr[start..].find('}') {
            let token = &expr[start + 1..start + end];
            let candidate = token.rsplit('.').next().unwrap_or(token).trim();
            if field_exists(entity, candidate) {
                found.push(candidate.to_string());
            }
        }
    }
    found
}

fn field_exists(entity: &Entity, name: &str) -> bool {
    entity.dimension_by_name(name).is_some()
        || entity.time_dimension_by_name(name).is_some()
        || entity.measure_by_name(name).is_some()
        || entity.metric_by_name(name).is_some()
}

pub fn scan_entity_properties(entity: &Entity, requested_fields: &[String]) -> PropertyScan {
    let mut closure: HashSet<String> = HashSet::new();
    let mut queue: Vec<String> = requested_fields.to_vec();

    while let Some(name) = queue.pop() {
        if !closure.insert(name.clone()) {
            continue;
        }

        if let Some(dimension) = entity.dimension_by_name(&name).or_else(|| entity.time_dimension_by_name(&name)) {
            for dep in referenced_field_names(entity, &dimension.sql) {
                if !closure.contains(&dep) {
                    queue.push(dep);
                }
            }
        } else if let Some(measure) = entity.measure_by_name(&name) {
            if let Some(sql) = &measure.sql {
                for dep in referenced_field_names(entity, sql) {
                    if !closure.contains(&dep) {
                        queue.push(dep);
                    }
                }
            }
        } else if let Some(metric) = entity.metric_by_name(&name) {
            if !closure.contains(&metric.measure) {
                queue.push(metric.measure.clone());
            }
            if !closure.contains(&metric.anchor_date) {
                queue.push(metric.anchor_date.clone());
            }
        }
    }

    let mut fields: Vec<String> = closure.into_iter().collect();
    fields.sort();
    PropertyScan { fields }
}

/// Annotation-only coverage check: which requested fields exist on at
/// least one of the given entities, and which don't.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageAssessment {
    pub covered: Vec<String>,
    pub missing: Vec<String>,
}

pub fn assess_coverage(entities: &[Entity], requested_fields: &[String]) -> CoverageAssessment {
    let mut assessment = CoverageAssessment::default();
    for field in requested_fields {
        let prefixed = field.split_once('.');
        let is_covered = entities.iter().any(|entity| match prefixed {
            Some((entity_name, bare)) => entity.name == entity_name && field_exists(entity, bare),
            None => field_exists(entity, field),
        });
        if is_covered {
            assessment.covered.push(field.clone());
        } else {
            assessment.missing.push(field.clone());
        }
    }
    assessment
}

#[cfg(test)]
#[path = "planning_tools_test.rs"]
mod tests;
