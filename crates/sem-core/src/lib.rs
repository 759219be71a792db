//! sem-core — shared semantic-layer types, configuration, and the semantic
//! store, used across every other crate in this workspace.

pub mod catalog;
pub mod config;
pub mod entity;
pub mod error;
pub mod execution_result;
pub mod plan;
pub mod planning_tools;
pub mod registry;
pub mod sql_utils;
pub mod store;

pub use catalog::{Catalog, EntityCard};
pub use config::SemanticConfig;
pub use entity::{Dimension, Entity, Join, MeasureKind, Metric, MetricFilter, Relationship};
pub use error::{CoreError, CoreResult};
pub use execution_result::{ColumnMeta, ExecutionResult, RepairMeta};
pub use plan::{FilterOperator, FinalizedPlan, Intent, JoinGraphEdge, JoinGraphOn, StructuredFilter, TimeRange};
pub use planning_tools::{assess_coverage, scan_entity_properties, search_schema, CoverageAssessment, PropertyScan, SchemaMatch};
pub use registry::EntityRegistry;
pub use store::SemanticStore;
