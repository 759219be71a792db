//! The Semantic Store: loads, validates, and memoizes entity descriptors and
//! the catalog from a file tree.

use crate::catalog::{Catalog, EntityCard};
use crate::entity::Entity;
use crate::error::{CoreError, CoreResult};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Loads entity descriptors and the catalog from a directory tree, caching
/// parsed results for the process lifetime.
///
/// One file per entity lives directly under `descriptor_root` as
/// `<name>.yml`. `catalog_path` is a single document describing every
/// entity's recall card.
pub struct SemanticStore {
    descriptor_root: PathBuf,
    catalog_path: PathBuf,
    entity_cache: Mutex<HashMap<String, Entity>>,
    catalog_cache: Mutex<Option<Catalog>>,
}

impl SemanticStore {
    /// Create a store rooted at the given descriptor directory and catalog file.
    pub fn new(descriptor_root: PathBuf, catalog_path: PathBuf) -> Self {
        Self {
            descriptor_root,
            catalog_path,
            entity_cache: Mutex::new(HashMap::new()),
            catalog_cache: Mutex::new(None),
        }
    }

    fn descriptor_path(&self, name: &str) -> PathBuf {
        self.descriptor_root.join(format!("{name}.yml"))
    }

    /// Enumerate descriptor names by listing `.yml` files under the
    /// descriptor root, sorted for determinism.
    pub fn list_entities(&self) -> CoreResult<Vec<String>> {
        if !self.descriptor_root.exists() {
            return Err(CoreError::DescriptorRootNotFound {
                path: self.descriptor_root.display().to_string(),
            });
        }
        let mut names: Vec<String> = std::fs::read_dir(&self.descriptor_root)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().is_some_and(|e| e == "yml" || e == "yaml") {
                    path.file_stem().and_then(|s| s.to_str()).map(String::from)
                } else {
                    None
                }
            })
            .collect();
        names.sort();
        Ok(names)
    }

    /// Load, validate, and cache the catalog document.
    pub fn load_catalog(&self) -> CoreResult<(Catalog, Vec<EntityCard>)> {
        let mut cache = self.catalog_cache.lock().unwrap();
        if let Some(catalog) = cache.as_ref() {
            return Ok((catalog.clone(), catalog.entities.clone()));
        }
        if !self.catalog_path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: self.catalog_path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(&self.catalog_path)?;
        let catalog = Catalog::from_yaml(&content)?;
        *cache = Some(catalog.clone());
        log::debug!("loaded catalog with {} entity cards", catalog.entities.len());
        Ok((catalog.clone(), catalog.entities.clone()))
    }

    /// Load, validate, and cache a single entity by name.
    ///
    /// Failure (missing file, parse error, schema violation, invariant
    /// violation) never populates the cache with a partially valid entity.
    pub fn load_entity(&self, name: &str) -> CoreResult<Entity> {
        {
            let cache = self.entity_cache.lock().unwrap();
            if let Some(entity) = cache.get(name) {
                return Ok(entity.clone());
            }
        }

        let path = self.descriptor_path(name);
        if !path.exists() {
            return Err(CoreError::EntityNotFound { name: name.to_string() });
        }
        let entity = Entity::from_file(&path)?;

        let mut cache = self.entity_cache.lock().unwrap();
        cache.insert(name.to_string(), entity.clone());
        log::debug!("loaded and cached entity '{name}'");
        Ok(entity)
    }

    /// Load several entities at once, failing fast on the first error.
    pub fn load_many(&self, names: &[String]) -> CoreResult<Vec<Entity>> {
        names.iter().map(|n| self.load_entity(n)).collect()
    }

    /// Read an entity descriptor's raw text, for prompt injection.
    pub fn read_raw(&self, name: &str) -> CoreResult<String> {
        let path = self.descriptor_path(name);
        if !path.exists() {
            return Err(CoreError::EntityNotFound { name: name.to_string() });
        }
        Ok(std::fs::read_to_string(path)?)
    }

    /// Explicitly invalidate every cache. Entities and the catalog are
    /// otherwise cached for the process lifetime.
    pub fn reset(&self) {
        self.entity_cache.lock().unwrap().clear();
        *self.catalog_cache.lock().unwrap() = None;
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
