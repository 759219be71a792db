//! Entity descriptors: dimensions, measures, metrics, and joins on a single
//! analytical table, plus the derived indexes used to resolve names quickly.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One of the enumerated join relationship kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

/// One of the enumerated measure aggregation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureKind {
    Count,
    CountDistinct,
    Sum,
    Avg,
    Min,
    Max,
}

impl MeasureKind {
    /// `count` is the only measure kind that does not require a `sql` expression.
    pub fn requires_sql(self) -> bool {
        !matches!(self, MeasureKind::Count)
    }
}

/// A named, typed column projection, possibly backed by a macro-expandable
/// SQL expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub sql: String,
    #[serde(rename = "type", default = "default_dimension_type")]
    pub r#type: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub primary_key: bool,
}

fn default_dimension_type() -> String {
    "string".to_string()
}

/// A named aggregation recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measure {
    pub name: String,
    pub calculation: MeasureKind,
    #[serde(default)]
    pub sql: Option<String>,
}

/// A predicate applied inside a metric's aggregation (see §4.4.1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricFilter {
    pub field: String,
    pub operator: String,
    pub values: Vec<String>,
}

/// A documented wrapper around exactly one measure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    #[serde(rename = "type", default = "default_metric_type")]
    pub r#type: String,
    pub measure: String,
    pub anchor_date: String,
    #[serde(default)]
    pub filters: Vec<MetricFilter>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

fn default_metric_type() -> String {
    "atomic".to_string()
}

/// An outgoing join edge to another entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Join {
    pub target_entity: String,
    pub relationship: Relationship,
    pub field: String,
    pub target_field: String,
}

/// Raw, on-disk shape of an entity descriptor (see §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntityDescriptor {
    name: String,
    table: String,
    grain: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    dimensions: Vec<Dimension>,
    #[serde(default)]
    time_dimensions: Vec<Dimension>,
    #[serde(default)]
    measures: Vec<Measure>,
    #[serde(default)]
    metrics: Vec<Metric>,
    #[serde(default)]
    joins: Vec<Join>,
    #[serde(default)]
    common_filters: HashMap<String, String>,
}

/// Derived, in-memory indexes over one entity's fields. Never serialized.
#[derive(Debug, Clone, Default)]
struct EntityIndex {
    dimension_by_name: HashMap<String, usize>,
    time_dimension_by_name: HashMap<String, usize>,
    measure_by_name: HashMap<String, usize>,
    metric_by_name: HashMap<String, usize>,
    alias_to_canonical: HashMap<String, String>,
}

/// A fully validated description of one analytical table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub table: String,
    pub grain: String,
    pub description: Option<String>,
    pub aliases: Vec<String>,
    pub dimensions: Vec<Dimension>,
    pub time_dimensions: Vec<Dimension>,
    pub measures: Vec<Measure>,
    pub metrics: Vec<Metric>,
    pub joins: Vec<Join>,
    pub common_filters: HashMap<String, String>,

    #[serde(skip)]
    index: EntityIndex,
}

impl Entity {
    /// Parse and validate an entity from its YAML descriptor.
    pub fn from_yaml(content: &str, source_name: &str) -> CoreResult<Self> {
        let raw: EntityDescriptor =
            serde_yaml::from_str(content).map_err(|e| CoreError::EntityParseError {
                name: source_name.to_string(),
                message: e.to_string(),
            })?;
        Self::from_descriptor(raw)
    }

    /// Load and validate an entity descriptor from a file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("<unknown>")
            .to_string();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content, &name)
    }

    fn from_descriptor(raw: EntityDescriptor) -> CoreResult<Self> {
        let mut entity = Entity {
            name: raw.name,
            table: raw.table,
            grain: raw.grain,
            description: raw.description,
            aliases: raw.aliases,
            dimensions: raw.dimensions,
            time_dimensions: raw.time_dimensions,
            measures: raw.measures,
            metrics: raw.metrics,
            joins: raw.joins,
            common_filters: raw.common_filters,
            index: EntityIndex::default(),
        };
        entity.build_index()?;
        entity.validate()?;
        Ok(entity)
    }

    fn build_index(&mut self) -> CoreResult<()> {
        let mut index = EntityIndex::default();

        for (i, d) in self.dimensions.iter().enumerate() {
            if index.dimension_by_name.insert(d.name.clone(), i).is_some() {
                return Err(CoreError::EntityInvariantViolation {
                    name: self.name.clone(),
                    message: format!("duplicate dimension name: {}", d.name),
                });
            }
            Self::register_aliases(&mut index.alias_to_canonical, &d.name, &d.aliases, &self.name)?;
        }

        for (i, d) in self.time_dimensions.iter().enumerate() {
            if index.time_dimension_by_name.insert(d.name.clone(), i).is_some() {
                return Err(CoreError::EntityInvariantViolation {
                    name: self.name.clone(),
                    message: format!("duplicate time dimension name: {}", d.name),
                });
            }
            Self::register_aliases(&mut index.alias_to_canonical, &d.name, &d.aliases, &self.name)?;
        }

        for (i, m) in self.measures.iter().enumerate() {
            if index.measure_by_name.insert(m.name.clone(), i).is_some() {
                return Err(CoreError::EntityInvariantViolation {
                    name: self.name.clone(),
                    message: format!("duplicate measure name: {}", m.name),
                });
            }
        }

        for (i, m) in self.metrics.iter().enumerate() {
            if index.metric_by_name.insert(m.name.clone(), i).is_some() {
                return Err(CoreError::EntityInvariantViolation {
                    name: self.name.clone(),
                    message: format!("duplicate metric name: {}", m.name),
                });
            }
            Self::register_aliases(&mut index.alias_to_canonical, &m.name, &m.aliases, &self.name)?;
        }

        self.index = index;
        Ok(())
    }

    /// Register aliases for a canonical field name, rejecting anything that
    /// would break the alias→canonical bijection.
    fn register_aliases(
        map: &mut HashMap<String, String>,
        canonical: &str,
        aliases: &[String],
        entity_name: &str,
    ) -> CoreResult<()> {
        // A name always resolves to itself.
        if let Some(existing) = map.insert(canonical.to_string(), canonical.to_string()) {
            if existing != canonical {
                return Err(CoreError::EntityInvariantViolation {
                    name: entity_name.to_string(),
                    message: format!("name '{canonical}' collides with an existing alias"),
                });
            }
        }
        for alias in aliases {
            if let Some(existing) = map.insert(alias.clone(), canonical.to_string()) {
                if existing != canonical {
                    return Err(CoreError::EntityInvariantViolation {
                        name: entity_name.to_string(),
                        message: format!(
                            "alias '{alias}' is ambiguous: maps to both '{existing}' and '{canonical}'"
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate(&self) -> CoreResult<()> {
        for measure in &self.measures {
            if measure.calculation.requires_sql() && measure.sql.is_none() {
                return Err(CoreError::EntityInvariantViolation {
                    name: self.name.clone(),
                    message: format!(
                        "measure '{}' of kind {:?} requires a sql expression",
                        measure.name, measure.calculation
                    ),
                });
            }
        }

        for metric in &self.metrics {
            if self.measure_by_name(&metric.measure).is_none() {
                return Err(CoreError::EntityInvariantViolation {
                    name: self.name.clone(),
                    message: format!(
                        "metric '{}' references unknown measure '{}'",
                        metric.name, metric.measure
                    ),
                });
            }
            if self.time_dimension_by_name(&metric.anchor_date).is_none() {
                return Err(CoreError::EntityInvariantViolation {
                    name: self.name.clone(),
                    message: format!(
                        "metric '{}' anchor_date '{}' is not a declared time dimension",
                        metric.name, metric.anchor_date
                    ),
                });
            }
        }

        for join in &self.joins {
            if self.dimension_by_name(&join.field).is_none() {
                return Err(CoreError::EntityInvariantViolation {
                    name: self.name.clone(),
                    message: format!(
                        "join to '{}' references local field '{}' which is not a declared dimension",
                        join.target_entity, join.field
                    ),
                });
            }
        }

        Ok(())
    }

    /// Resolve a canonical or alias name to a declared (non-time) dimension.
    pub fn dimension_by_name(&self, name: &str) -> Option<&Dimension> {
        let canonical = self.index.alias_to_canonical.get(name)?;
        self.index
            .dimension_by_name
            .get(canonical)
            .map(|&i| &self.dimensions[i])
    }

    /// Resolve a canonical or alias name to a declared time dimension.
    pub fn time_dimension_by_name(&self, name: &str) -> Option<&Dimension> {
        let canonical = self.index.alias_to_canonical.get(name)?;
        self.index
            .time_dimension_by_name
            .get(canonical)
            .map(|&i| &self.time_dimensions[i])
    }

    /// Resolve a name to either a dimension or a time dimension.
    pub fn dimension_or_time_by_name(&self, name: &str) -> Option<&Dimension> {
        self.dimension_by_name(name)
            .or_else(|| self.time_dimension_by_name(name))
    }

    /// Resolve a measure by exact canonical name (measures are not aliased).
    pub fn measure_by_name(&self, name: &str) -> Option<&Measure> {
        self.index.measure_by_name.get(name).map(|&i| &self.measures[i])
    }

    /// Resolve a canonical or alias name to a declared metric.
    pub fn metric_by_name(&self, name: &str) -> Option<&Metric> {
        let canonical = self.index.alias_to_canonical.get(name)?;
        self.index.metric_by_name.get(canonical).map(|&i| &self.metrics[i])
    }

    /// The first declared time dimension, used as the default anchor for
    /// time-range predicates and synthesized metrics.
    pub fn first_time_dimension(&self) -> Option<&Dimension> {
        self.time_dimensions.first()
    }
}

#[cfg(test)]
#[path = "entity_test.rs"]
mod tests;
