//! The undirected join graph: one directed record per traversal direction
//! for every declared join.

use crate::error::{JoinError, JoinResult};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use sem_core::entity::Relationship;
use sem_core::registry::EntityRegistry;
use std::collections::{HashMap, HashSet, VecDeque};

/// One traversable edge: a declared join, in a specific direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEdge {
    pub from_entity: String,
    pub to_entity: String,
    pub from_field: String,
    pub to_field: String,
    pub relationship: Relationship,
}

/// A `one_to_many`/`many_to_one` pair flips when the edge is traversed in
/// reverse; `one_to_one` and `many_to_many` are symmetric.
fn reverse_relationship(relationship: Relationship) -> Relationship {
    match relationship {
        Relationship::OneToMany => Relationship::ManyToOne,
        Relationship::ManyToOne => Relationship::OneToMany,
        other => other,
    }
}

/// A directed graph holding both directions of every declared join,
/// built once per request from every entity in the registry.
pub(crate) struct JoinGraph {
    graph: DiGraph<String, PlannedEdge>,
    node_index: HashMap<String, NodeIndex>,
}

impl JoinGraph {
    /// Build the graph. Entity iteration is sorted by name so that edge
    /// insertion order — and therefore BFS tie-breaking — is deterministic
    /// regardless of the registry's internal hash map ordering.
    pub(crate) fn build(registry: &EntityRegistry) -> Self {
        let mut names: Vec<&str> = registry.names();
        names.sort();

        let mut graph = DiGraph::new();
        let mut node_index = HashMap::new();
        for name in &names {
            let idx = graph.add_node((*name).to_string());
            node_index.insert((*name).to_string(), idx);
        }

        for name in &names {
            let entity = registry.get(name).expect("name came from registry.names()");
            let Some(&from_idx) = node_index.get(&entity.name) else {
                continue;
            };
            for join in &entity.joins {
                let Some(&to_idx) = node_index.get(&join.target_entity) else {
                    continue;
                };
                graph.add_edge(
                    from_idx,
                    to_idx,
                    PlannedEdge {
                        from_entity: entity.name.clone(),
                        to_entity: join.target_entity.clone(),
                        from_field: join.field.clone(),
                        to_field: join.target_field.clone(),
                        relationship: join.relationship,
                    },
                );
                graph.add_edge(
                    to_idx,
                    from_idx,
                    PlannedEdge {
                        from_entity: join.target_entity.clone(),
                        to_entity: entity.name.clone(),
                        from_field: join.target_field.clone(),
                        to_field: join.field.clone(),
                        relationship: reverse_relationship(join.relationship),
                    },
                );
            }
        }

        Self { graph, node_index }
    }

    /// BFS shortest path from `base` to `target`, returned as the ordered
    /// edges to traverse. Empty if `base == target`.
    pub(crate) fn shortest_path(&self, base: &str, target: &str) -> JoinResult<Vec<PlannedEdge>> {
        let base_idx = *self
            .node_index
            .get(base)
            .ok_or_else(|| JoinError::EntityNotFound { entity: base.to_string() })?;
        let target_idx = *self
            .node_index
            .get(target)
            .ok_or_else(|| JoinError::EntityNotFound { entity: target.to_string() })?;

        if base_idx == target_idx {
            return Ok(Vec::new());
        }

        let mut visited = HashSet::new();
        visited.insert(base_idx);
        let mut queue = VecDeque::new();
        queue.push_back(base_idx);
        let mut predecessor: HashMap<NodeIndex, EdgeIndex> = HashMap::new();

        'bfs: while let Some(current) = queue.pop_front() {
            for edge_ref in self.graph.edges(current) {
                let next = edge_ref.target();
                if visited.insert(next) {
                    predecessor.insert(next, edge_ref.id());
                    if next == target_idx {
                        break 'bfs;
                    }
                    queue.push_back(next);
                }
            }
        }

        if !visited.contains(&target_idx) {
            return Err(JoinError::Unreachable {
                base: base.to_string(),
                target: target.to_string(),
            });
        }

        let mut path_edges = Vec::new();
        let mut cursor = target_idx;
        while cursor != base_idx {
            let edge_idx = predecessor[&cursor];
            let (source, _) = self.graph.edge_endpoints(edge_idx).unwrap();
            path_edges.push(self.graph[edge_idx].clone());
            cursor = source;
        }
        path_edges.reverse();
        Ok(path_edges)
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
