//! The SQL Renderer (§4.4): turns a `FinalizedPlan` plus a populated
//! registry into the `SELECT ... FROM ... [JOIN ...] WHERE ... GROUP BY ...
//! LIMIT 1001` shape described in §6.

use crate::aggregation::render_aggregation;
use crate::error::{RenderError, RenderResult};
use crate::predicate::render_predicate;
use sem_core::entity::{Entity, Measure, Relationship};
use sem_core::plan::FinalizedPlan;
use sem_core::registry::EntityRegistry;
use sem_core::sql_utils::{escape_sql_string, quote_ident, quote_qualified};
use sem_join::plan_join_path;
use sem_macro::{expand, qualify_simple_column, ExpandContext};

/// Render `plan` against `registry`, which must already contain every
/// entity in `selectedEntities ∪ joinGraph endpoints`.
pub fn render_sql<'a>(plan: &FinalizedPlan, registry: &'a EntityRegistry) -> RenderResult<String> {
    let base_name = &plan.selected_entities[0];
    let base_entity = entity_or_not_found(registry, base_name)?;

    let join_path = plan_join_path(base_name, &plan.selected_entities, registry)?;
    let alias_by_entity = join_path.alias_by_entity.clone();

    let base_ctx = |entity: &str| ExpandContext {
        current_entity: entity.to_string(),
        alias_by_entity: alias_by_entity.clone(),
        registry,
    };

    let mut select_items = Vec::new();

    for dimension_name in &plan.intent.dimensions {
        let ctx = base_ctx(base_name);
        let expr = expand(&format!("{{{dimension_name}}}"), &ctx)?;
        let label = dimension_name.rsplit('.').next().unwrap_or(dimension_name);
        select_items.push(format!("{expr} AS {}", quote_ident(label)));
    }
    let dim_count = plan.intent.dimensions.len();

    for metric_name in &plan.intent.metrics {
        select_items.push(render_metric_select(metric_name, &join_path.ordered_entities, registry, &base_ctx)?);
    }

    let base_table = quote_qualified(&base_entity.table);
    let base_alias = alias_by_entity.get(base_name).expect("base is always aliased t0");
    let mut from_lines = vec![format!("FROM {base_table} {base_alias}")];

    for edge in &join_path.edges {
        let join_kw = if edge.relationship == Relationship::ManyToMany { "INNER" } else { "LEFT" };
        let from_entity = entity_or_not_found(registry, &edge.from_entity)?;
        let to_entity = entity_or_not_found(registry, &edge.to_entity)?;
        let from_alias = alias_by_entity.get(&edge.from_entity).expect("edge endpoint is always aliased");
        let to_alias = alias_by_entity.get(&edge.to_entity).expect("edge endpoint is always aliased");
        let to_table = quote_qualified(&to_entity.table);
        let left_col = qualify_simple_column(from_entity, from_alias, &edge.from_field)?;
        let right_col = qualify_simple_column(to_entity, to_alias, &edge.to_field)?;
        from_lines.push(format!("{join_kw} JOIN {to_table} {to_alias} ON {left_col} = {right_col}"));
    }

    let mut where_clauses = Vec::new();
    if let Some(time_range) = &plan.intent.time_range {
        let time_dimension = base_entity
            .first_time_dimension()
            .ok_or_else(|| RenderError::NoTimeDimension { entity: base_name.clone() })?;
        let ctx = base_ctx(base_name);
        let t_expr = expand(&format!("{{{}}}", time_dimension.name), &ctx)?;
        where_clauses.push(format!("{t_expr} >= '{}'", escape_sql_string(&time_range.start)));
        where_clauses.push(format!("{t_expr} < '{}'", escape_sql_string(&time_range.end)));
    }
    for filter in &plan.intent.structured_filters {
        let ctx = base_ctx(base_name);
        where_clauses.push(render_predicate(&filter.field, filter.operator.as_symbol(), &filter.values, &ctx)?);
    }

    let comment_lines: Vec<String> = plan.intent.filters.iter().map(|f| format!("-- filter: {f}")).collect();

    let mut lines = Vec::new();
    lines.push("SELECT".to_string());
    lines.push(format!("  {}", select_items.join(",\n  ")));
    lines.extend(from_lines);
    lines.extend(comment_lines);
    if !where_clauses.is_empty() {
        lines.push(format!("WHERE {}", where_clauses.join("\n  AND ")));
    }
    if dim_count > 0 {
        let ordinals = (1..=dim_count).map(|i| i.to_string()).collect::<Vec<_>>().join(", ");
        lines.push(format!("GROUP BY {ordinals}"));
    }
    lines.push("LIMIT 1001".to_string());

    Ok(lines.join("\n"))
}

fn entity_or_not_found<'a>(registry: &'a EntityRegistry, name: &str) -> RenderResult<&'a Entity> {
    registry
        .get(name)
        .ok_or_else(|| RenderError::Join(sem_join::JoinError::EntityNotFound { entity: name.to_string() }))
}

/// Resolve `metric_name` against `ordered_entities` — a full pass for a
/// declared metric first, then a full pass for a bare measure — and render
/// its `<agg_expr> AS "name"` select item.
fn render_metric_select<'a>(
    metric_name: &str,
    ordered_entities: &[String],
    registry: &'a EntityRegistry,
    base_ctx: &impl Fn(&str) -> ExpandContext<'a>,
) -> RenderResult<String> {
    for entity_name in ordered_entities {
        let entity = entity_or_not_found(registry, entity_name)?;
        if let Some(metric) = entity.metric_by_name(metric_name) {
            let measure = entity
                .measure_by_name(&metric.measure)
                .expect("entity validation guarantees metric.measure exists");
            let ctx = base_ctx(entity_name);
            let predicates = lower_metric_filters(&metric.filters, &ctx)?;
            let expr = measure_expr(measure, &ctx)?;
            let agg = render_aggregation(measure.calculation, expr.as_deref(), &predicates);
            return Ok(format!("{agg} AS {}", quote_ident(metric_name)));
        }
    }

    for entity_name in ordered_entities {
        let entity = entity_or_not_found(registry, entity_name)?;
        if let Some(measure) = entity.measure_by_name(metric_name) {
            let ctx = base_ctx(entity_name);
            let expr = measure_expr(measure, &ctx)?;
            let agg = render_aggregation(measure.calculation, expr.as_deref(), &[]);
            return Ok(format!("{agg} AS {}", quote_ident(metric_name)));
        }
    }

    Err(RenderError::MetricNotFound { name: metric_name.to_string() })
}

fn measure_expr(measure: &Measure, ctx: &ExpandContext) -> RenderResult<Option<String>> {
    match &measure.sql {
        Some(sql) => Ok(Some(expand(sql, ctx)?)),
        None => Ok(None),
    }
}

fn lower_metric_filters(filters: &[sem_core::entity::MetricFilter], ctx: &ExpandContext) -> RenderResult<Vec<String>> {
    filters
        .iter()
        .map(|f| render_predicate(&f.field, &f.operator, &f.values, ctx))
        .collect()
}

#[cfg(test)]
#[path = "renderer_test.rs"]
mod tests;
