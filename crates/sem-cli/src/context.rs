//! Runtime context for CLI commands: loaded config, the semantic store, a
//! seeded in-memory warehouse, and the execution guard that fronts it.

use anyhow::{Context, Result};
use sem_core::config::SemanticConfig;
use sem_core::store::SemanticStore;
use sem_db::DuckDbWarehouse;
use sem_guard::ExecutionGuard;
use std::path::Path;

use crate::cli::GlobalArgs;
use crate::fixtures;

/// Everything a command needs: the loaded config, the semantic store, a
/// warehouse seeded with fixture tables, and its guard.
pub struct RuntimeContext {
    pub config: SemanticConfig,
    pub store: SemanticStore,
    pub warehouse: DuckDbWarehouse,
    pub guard: ExecutionGuard,
    pub verbose: bool,
}

impl RuntimeContext {
    pub fn new(global: &GlobalArgs) -> Result<Self> {
        let project_dir = Path::new(&global.project_dir);
        let config = SemanticConfig::load_from_dir(project_dir).context("failed to load semantic.yml")?;

        let descriptor_root = config.descriptor_root_absolute(project_dir);
        let catalog_path = config.catalog_path_absolute(project_dir);
        let store = SemanticStore::new(descriptor_root, catalog_path);

        let warehouse = DuckDbWarehouse::in_memory().context("failed to open the embedded warehouse")?;
        fixtures::seed(&warehouse)?;

        let guard = ExecutionGuard::new(&config);

        Ok(Self {
            config,
            store,
            warehouse,
            guard,
            verbose: global.verbose,
        })
    }

    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {msg}");
        }
    }
}
