//! The top-level catalog: a flat list of entity cards used for keyword
//! recall during Planning.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// One entity's recall card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityCard {
    pub name: String,
    pub grain: String,
    #[serde(default)]
    pub num_rows: Option<u64>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub example_questions: Vec<String>,
    #[serde(default)]
    pub use_cases: Vec<String>,
    #[serde(default)]
    pub owners: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The parsed catalog document (see §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    pub version: String,
    pub entities: Vec<EntityCard>,
}

impl Catalog {
    /// Parse a catalog from YAML content.
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        let catalog: Catalog =
            serde_yaml::from_str(content).map_err(|e| CoreError::CatalogInvalid {
                message: e.to_string(),
            })?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> CoreResult<()> {
        if self.entities.is_empty() {
            return Err(CoreError::CatalogInvalid {
                message: "catalog must describe at least one entity".into(),
            });
        }
        let mut seen = std::collections::HashSet::new();
        for card in &self.entities {
            if !seen.insert(card.name.clone()) {
                return Err(CoreError::CatalogInvalid {
                    message: format!("duplicate entity card: {}", card.name),
                });
            }
        }
        Ok(())
    }

    /// Keyword-scored recall over name, description, and example questions.
    /// Returns the top `limit` cards by score, highest first, ties broken by
    /// declaration order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&EntityCard> {
        let terms: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(|s| s.to_string())
            .collect();
        if terms.is_empty() {
            return self.entities.iter().take(limit).collect();
        }

        let mut scored: Vec<(usize, &EntityCard)> = self
            .entities
            .iter()
            .map(|card| (Self::score(card, &terms), card))
            .filter(|(score, _)| *score > 0)
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().take(limit).map(|(_, c)| c).collect()
    }

    fn score(card: &EntityCard, terms: &[String]) -> usize {
        let name = card.name.to_lowercase();
        let description = card.description.clone().unwrap_or_default().to_lowercase();
        let questions = card.example_questions.join(" ").to_lowercase();

        let mut score = 0usize;
        for term in terms {
            if name.contains(term.as_str()) {
                score += 5;
            }
            if description.contains(term.as_str()) {
                score += 2;
            }
            if questions.contains(term.as_str()) {
                score += 3;
            }
        }
        score
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
