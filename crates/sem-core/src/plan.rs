//! The Planning → Building handoff artifact and its constituent types.

use crate::entity::Relationship;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// A comparison operator for a structured filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
    In,
    NotIn,
}

impl FilterOperator {
    /// `in`/`not_in` take a non-empty list; every other operator takes
    /// exactly one value.
    pub fn is_list_operator(self) -> bool {
        matches!(self, FilterOperator::In | FilterOperator::NotIn)
    }

    /// The operator's rendering symbol, as used by the SQL renderer.
    pub fn as_symbol(self) -> &'static str {
        match self {
            FilterOperator::Eq => "=",
            FilterOperator::Ne => "!=",
            FilterOperator::Gt => ">",
            FilterOperator::Gte => ">=",
            FilterOperator::Lt => "<",
            FilterOperator::Lte => "<=",
            FilterOperator::In => "in",
            FilterOperator::NotIn => "not_in",
        }
    }
}

/// `{ field, operator, values[] }` — a structured predicate over a resolved field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredFilter {
    pub field: String,
    pub operator: FilterOperator,
    pub values: Vec<String>,
}

impl StructuredFilter {
    /// Validate the arity rule: list ops need ≥1 value, scalar ops need exactly 1.
    pub fn validate(&self) -> CoreResult<()> {
        if self.operator.is_list_operator() {
            if self.values.is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "structured filter on '{}' uses {:?} and requires at least one value",
                        self.field, self.operator
                    ),
                });
            }
        } else if self.values.len() != 1 {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "structured filter on '{}' uses {:?} and requires exactly one value",
                    self.field, self.operator
                ),
            });
        }
        Ok(())
    }
}

/// `{ start, end, grain }` — a half-open time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub grain: Option<String>,
}

/// The Planning-phase intent: what to select and how to filter it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Intent {
    #[serde(default)]
    pub metrics: Vec<String>,
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub structured_filters: Vec<StructuredFilter>,
    /// Free-form advisory filters; rendered only as SQL comments (§4.4, §9).
    #[serde(default)]
    pub filters: Vec<String>,
    #[serde(default)]
    pub time_range: Option<TimeRange>,
    #[serde(default)]
    pub grain: Option<String>,
    #[serde(default)]
    pub compare: Option<String>,
}

/// One edge of the Planning-phase join graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinGraphEdge {
    pub from: String,
    pub to: String,
    pub on: JoinGraphOn,
    pub relationship: Relationship,
}

/// The local/remote field pair for a join graph edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinGraphOn {
    pub from: String,
    pub to: String,
}

/// The Planning-phase output, consumed by Building.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizedPlan {
    pub intent: Intent,
    pub selected_entities: Vec<String>,
    #[serde(default)]
    pub required_fields: Vec<String>,
    #[serde(default)]
    pub assumptions: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub join_graph: Vec<JoinGraphEdge>,
}

impl FinalizedPlan {
    /// Validate structural invariants (§3): 1–3 selected entities, every
    /// structured filter has correct arity, and every join-graph endpoint is
    /// reachable from the selected set.
    pub fn validate(&self) -> CoreResult<()> {
        if self.selected_entities.is_empty() || self.selected_entities.len() > 3 {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "selectedEntities must have between 1 and 3 entries, got {}",
                    self.selected_entities.len()
                ),
            });
        }

        for filter in &self.intent.structured_filters {
            filter.validate()?;
        }

        let mut reachable: std::collections::HashSet<&str> =
            self.selected_entities.iter().map(|s| s.as_str()).collect();
        // A join graph can be built incrementally: an edge's `from` being
        // reachable makes its `to` reachable too, in any declaration order.
        let mut changed = true;
        while changed {
            changed = false;
            for edge in &self.join_graph {
                if reachable.contains(edge.from.as_str()) && reachable.insert(edge.to.as_str()) {
                    changed = true;
                }
                if reachable.contains(edge.to.as_str()) && reachable.insert(edge.from.as_str()) {
                    changed = true;
                }
            }
        }
        for edge in &self.join_graph {
            if !reachable.contains(edge.from.as_str()) || !reachable.contains(edge.to.as_str()) {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "join graph edge {}->{} is not reachable from the selected entities",
                        edge.from, edge.to
                    ),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
