//! Semantic scan (§4.5): schema policy and plan-to-registry resolvability.

use crate::report::{ValidationIssue, ValidationReport};
use sem_core::config::SemanticConfig;
use sem_core::plan::FinalizedPlan;
use sem_core::registry::EntityRegistry;
use sem_core::sql_utils::split_schema_table;

/// Run the semantic scan over `plan` against the entities loaded into
/// `registry`, under `config`'s schema allow-list.
pub fn validate_semantic(plan: &FinalizedPlan, registry: &EntityRegistry, config: &SemanticConfig) -> ValidationReport {
    let mut issues = Vec::new();

    check_schema_policy(registry, config, &mut issues);
    check_selected_entities_present(plan, registry, &mut issues);
    check_join_graph_endpoints_present(plan, registry, &mut issues);
    check_dimensions_resolve(plan, registry, &mut issues);
    check_metrics_resolve(plan, registry, &mut issues);
    check_time_range_has_a_time_dimension(plan, registry, &mut issues);

    if !issues.is_empty() {
        log::warn!("semantic scan found {} issue(s) for entities {:?}", issues.len(), plan.selected_entities);
    }

    ValidationReport::from_issues(issues)
}

fn check_schema_policy(registry: &EntityRegistry, config: &SemanticConfig, issues: &mut Vec<ValidationIssue>) {
    for entity in registry.entities() {
        match split_schema_table(&entity.table) {
            None => issues.push(ValidationIssue::new(
                "unqualified_table",
                format!("entity '{}' table '{}' is not schema-qualified", entity.name, entity.table),
            )),
            Some((schema, _)) => {
                if !config.allowed_schemas.iter().any(|s| s == &schema) {
                    issues.push(ValidationIssue::new(
                        "schema_not_allowed",
                        format!("entity '{}' schema '{schema}' is not in the allow-list", entity.name),
                    ));
                }
            }
        }
    }
}

fn check_selected_entities_present(plan: &FinalizedPlan, registry: &EntityRegistry, issues: &mut Vec<ValidationIssue>) {
    for name in &plan.selected_entities {
        if !registry.contains(name) {
            issues.push(ValidationIssue::new(
                "selected_entity_not_loaded",
                format!("selected entity '{name}' is not loaded into the registry"),
            ));
        }
    }
}

fn check_join_graph_endpoints_present(plan: &FinalizedPlan, registry: &EntityRegistry, issues: &mut Vec<ValidationIssue>) {
    for edge in &plan.join_graph {
        if !registry.contains(&edge.from) {
            issues.push(ValidationIssue::new(
                "join_graph_endpoint_not_loaded",
                format!("join graph endpoint '{}' is not loaded into the registry", edge.from),
            ));
        }
        if !registry.contains(&edge.to) {
            issues.push(ValidationIssue::new(
                "join_graph_endpoint_not_loaded",
                format!("join graph endpoint '{}' is not loaded into the registry", edge.to),
            ));
        }
    }
}

/// Split a field name on its first `.` only when the left side names a
/// loaded entity — otherwise the whole string is a bare field name (field
/// names may themselves legally contain `.` in principle, though none do
/// in practice).
fn split_field_reference<'a>(field: &'a str, registry: &EntityRegistry) -> Option<(&'a str, &'a str)> {
    let (entity, rest) = field.split_once('.')?;
    if registry.contains(entity) {
        Some((entity, rest))
    } else {
        None
    }
}

fn check_dimensions_resolve(plan: &FinalizedPlan, registry: &EntityRegistry, issues: &mut Vec<ValidationIssue>) {
    for dim in &plan.intent.dimensions {
        let resolves = match split_field_reference(dim, registry) {
            Some((entity, field)) => registry
                .get(entity)
                .map(|e| e.dimension_or_time_by_name(field).is_some())
                .unwrap_or(false),
            None => registry.entities().any(|e| e.dimension_or_time_by_name(dim).is_some()),
        };
        if !resolves {
            issues.push(ValidationIssue::new(
                "dimension_not_found",
                format!("dimension '{dim}' does not resolve against any loaded entity"),
            ));
        }
    }
}

fn check_metrics_resolve(plan: &FinalizedPlan, registry: &EntityRegistry, issues: &mut Vec<ValidationIssue>) {
    for metric in &plan.intent.metrics {
        let resolves = match split_field_reference(metric, registry) {
            Some((entity, field)) => registry
                .get(entity)
                .map(|e| e.metric_by_name(field).is_some() || e.measure_by_name(field).is_some())
                .unwrap_or(false),
            None => registry
                .entities()
                .any(|e| e.metric_by_name(metric).is_some() || e.measure_by_name(metric).is_some()),
        };
        if !resolves {
            issues.push(ValidationIssue::new(
                "metric_not_found",
                format!("metric or measure '{metric}' does not resolve against any loaded entity"),
            ));
        }
    }
}

fn check_time_range_has_a_time_dimension(plan: &FinalizedPlan, registry: &EntityRegistry, issues: &mut Vec<ValidationIssue>) {
    if plan.intent.time_range.is_some() && !registry.entities().any(|e| e.first_time_dimension().is_some()) {
        issues.push(ValidationIssue::new(
            "no_time_dimension",
            "intent.timeRange is set but no loaded entity exposes a time dimension",
        ));
    }
}

#[cfg(test)]
#[path = "semantic_test.rs"]
mod tests;
