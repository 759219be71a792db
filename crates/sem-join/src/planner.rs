//! Composes the per-target BFS paths into the join path the renderer needs:
//! a deduplicated edge list plus deterministic table aliases.

use crate::error::{JoinError, JoinResult};
use crate::graph::{JoinGraph, PlannedEdge};
use sem_core::registry::EntityRegistry;
use std::collections::{HashMap, HashSet};

/// `{edges[], aliasByEntity, orderedEntities[]}` — the full output of join planning.
#[derive(Debug, Clone)]
pub struct JoinPath {
    pub edges: Vec<PlannedEdge>,
    pub alias_by_entity: HashMap<String, String>,
    pub ordered_entities: Vec<String>,
}

impl JoinPath {
    /// A single-entity plan: no edges, base aliased `t0`.
    fn single(base: &str) -> Self {
        let mut alias_by_entity = HashMap::new();
        alias_by_entity.insert(base.to_string(), "t0".to_string());
        JoinPath {
            edges: Vec::new(),
            alias_by_entity,
            ordered_entities: vec![base.to_string()],
        }
    }
}

/// Plan the join path from `base` covering every entity in `required`
/// (which must include `base`), over every declared join in `registry`.
pub fn plan_join_path(base: &str, required: &[String], registry: &EntityRegistry) -> JoinResult<JoinPath> {
    if registry.get(base).is_none() {
        return Err(JoinError::EntityNotFound { entity: base.to_string() });
    }
    for target in required {
        if registry.get(target).is_none() {
            return Err(JoinError::EntityNotFound {
                entity: target.clone(),
            });
        }
    }

    let mut targets: Vec<&str> = Vec::new();
    let mut seen_targets = HashSet::new();
    for target in required {
        if target != base && seen_targets.insert(target.as_str()) {
            targets.push(target.as_str());
        }
    }

    if targets.is_empty() {
        return Ok(JoinPath::single(base));
    }

    let graph = JoinGraph::build(registry);

    let mut edges = Vec::new();
    let mut seen_edges: HashSet<(String, String, String, String)> = HashSet::new();
    let mut touched: HashSet<String> = HashSet::new();

    for target in targets {
        let path = graph.shortest_path(base, target)?;
        for edge in path {
            touched.insert(edge.from_entity.clone());
            touched.insert(edge.to_entity.clone());
            let key = (
                edge.from_entity.clone(),
                edge.to_entity.clone(),
                edge.from_field.clone(),
                edge.to_field.clone(),
            );
            if seen_edges.insert(key) {
                edges.push(edge);
            }
        }
    }

    touched.remove(base);
    let mut others: Vec<String> = touched.into_iter().collect();
    others.sort();

    let mut alias_by_entity = HashMap::new();
    alias_by_entity.insert(base.to_string(), "t0".to_string());
    let mut ordered_entities = vec![base.to_string()];
    for (i, name) in others.into_iter().enumerate() {
        alias_by_entity.insert(name.clone(), format!("t{}", i + 1));
        ordered_entities.push(name);
    }

    log::debug!(
        "planned join path from '{base}' covering {} entities over {} edges",
        ordered_entities.len(),
        edges.len()
    );

    Ok(JoinPath {
        edges,
        alias_by_entity,
        ordered_entities,
    })
}

#[cfg(test)]
#[path = "planner_test.rs"]
mod tests;
