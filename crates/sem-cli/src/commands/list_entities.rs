//! `list-entities` command implementation

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use crate::commands::common::print_table;
use crate::context::RuntimeContext;

pub fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;

    let (_catalog, cards) = ctx.store.load_catalog().context("failed to load the catalog")?;

    let rows: Vec<Vec<String>> = cards
        .iter()
        .map(|card| {
            vec![
                card.name.clone(),
                card.grain.clone(),
                card.num_rows.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string()),
                card.domain.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();

    print_table(&["NAME", "GRAIN", "ROWS", "DOMAIN"], &rows);
    Ok(())
}
