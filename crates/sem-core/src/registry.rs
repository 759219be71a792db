//! An owned, request-scoped set of loaded entities, keyed by name.
//!
//! The macro expander, join planner, renderer, and validator all borrow this
//! read-only within a single request; it owns nothing the semantic store
//! doesn't already own a copy of.

use crate::entity::Entity;
use std::collections::HashMap;

/// A read-only view over the entities relevant to one request.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: HashMap<String, Entity>,
}

impl EntityRegistry {
    /// Build a registry from an already-loaded set of entities.
    pub fn from_entities(entities: Vec<Entity>) -> Self {
        Self {
            entities: entities.into_iter().map(|e| (e.name.clone(), e)).collect(),
        }
    }

    /// Look up an entity by its canonical name.
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// Whether an entity with this name is loaded into the registry.
    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    /// Every loaded entity name.
    pub fn names(&self) -> Vec<&str> {
        self.entities.keys().map(|s| s.as_str()).collect()
    }

    /// All loaded entities.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
