//! Configuration types and parsing for `semantic.yml`

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_allowed_schemas() -> Vec<String> {
    vec!["analytics".into(), "crm".into(), "main".into()]
}

fn default_statement_timeout_ms() -> u64 {
    20_000
}

fn default_explain_timeout_ms() -> u64 {
    10_000
}

fn default_max_attempts() -> u8 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    250
}

fn default_breaker_threshold() -> u32 {
    3
}

fn default_breaker_cooldown_ms() -> u64 {
    60_000
}

fn default_cache_capacity() -> usize {
    100
}

fn default_cache_ttl_ms() -> u64 {
    300_000
}

fn default_max_repair_attempts() -> u8 {
    2
}

fn default_step_ceiling() -> u32 {
    100
}

fn default_descriptor_root() -> PathBuf {
    PathBuf::from("entities")
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("catalog.yml")
}

/// Top-level configuration for the semantic layer, loaded from `semantic.yml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SemanticConfig {
    /// Project name, used only for logging context.
    pub name: String,

    /// Directory holding one entity descriptor file per entity.
    #[serde(default = "default_descriptor_root")]
    pub descriptor_root: PathBuf,

    /// Path to the catalog document.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Allow-listed schemas; a loaded entity's table must qualify into one of these.
    #[serde(default = "default_allowed_schemas")]
    pub allowed_schemas: Vec<String>,

    /// Per-statement execution timeout, in milliseconds.
    #[serde(default = "default_statement_timeout_ms")]
    pub statement_timeout_ms: u64,

    /// Timeout for EXPLAIN/cost-estimation calls, in milliseconds.
    #[serde(default = "default_explain_timeout_ms")]
    pub explain_timeout_ms: u64,

    /// Maximum execution attempts (including the first), clamped to at most 5.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u8,

    /// Base delay for exponential backoff between retries, in milliseconds.
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    /// Consecutive failures before the circuit breaker opens.
    #[serde(default = "default_breaker_threshold")]
    pub breaker_threshold: u32,

    /// Cooldown period once the breaker is open, in milliseconds.
    #[serde(default = "default_breaker_cooldown_ms")]
    pub breaker_cooldown_ms: u64,

    /// Maximum number of entries kept in the result cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Result cache entry time-to-live, in milliseconds.
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,

    /// Maximum number of classifier-driven repair attempts per request.
    #[serde(default = "default_max_repair_attempts")]
    pub max_repair_attempts: u8,

    /// Hard ceiling on orchestrator tool-calling steps per request.
    #[serde(default = "default_step_ceiling")]
    pub step_ceiling: u32,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            name: "semantic-agent".into(),
            descriptor_root: default_descriptor_root(),
            catalog_path: default_catalog_path(),
            allowed_schemas: default_allowed_schemas(),
            statement_timeout_ms: default_statement_timeout_ms(),
            explain_timeout_ms: default_explain_timeout_ms(),
            max_attempts: default_max_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            breaker_threshold: default_breaker_threshold(),
            breaker_cooldown_ms: default_breaker_cooldown_ms(),
            cache_capacity: default_cache_capacity(),
            cache_ttl_ms: default_cache_ttl_ms(),
            max_repair_attempts: default_max_repair_attempts(),
            step_ceiling: default_step_ceiling(),
        }
    }
}

impl SemanticConfig {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a project directory, looking for `semantic.yml`.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        Self::load(&dir.join("semantic.yml"))
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        let mut config: Self =
            serde_yaml::from_str(content).map_err(|e| CoreError::ConfigParseError {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&mut self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "name must not be empty".into(),
            });
        }
        if self.allowed_schemas.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "allowed_schemas must not be empty".into(),
            });
        }
        if self.max_attempts == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "max_attempts must be at least 1".into(),
            });
        }
        // Spec §4.6: retries are capped at N=5 regardless of configured value.
        if self.max_attempts > 5 {
            self.max_attempts = 5;
        }
        // Spec §4.6: at most two repair attempts per request, fixed — not
        // configurable beyond documentation (SPEC_FULL.md §2.1).
        if self.max_repair_attempts > 2 {
            self.max_repair_attempts = 2;
        }
        Ok(())
    }

    /// Resolve `descriptor_root` to an absolute path relative to `base`.
    pub fn descriptor_root_absolute(&self, base: &Path) -> PathBuf {
        if self.descriptor_root.is_absolute() {
            self.descriptor_root.clone()
        } else {
            base.join(&self.descriptor_root)
        }
    }

    /// Resolve `catalog_path` to an absolute path relative to `base`.
    pub fn catalog_path_absolute(&self, base: &Path) -> PathBuf {
        if self.catalog_path.is_absolute() {
            self.catalog_path.clone()
        } else {
            base.join(&self.catalog_path)
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
