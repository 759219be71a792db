//! `list-scenarios` command implementation

use anyhow::Result;

use crate::commands::common::print_table;
use crate::scenarios::{self, SCENARIO_NAMES};

pub fn execute() -> Result<()> {
    let rows: Vec<Vec<String>> = SCENARIO_NAMES
        .iter()
        .map(|name| {
            let plan = scenarios::by_name(name).expect("SCENARIO_NAMES and by_name must stay in sync");
            vec![name.to_string(), plan.selected_entities.join(", "), plan.intent.metrics.join(", ")]
        })
        .collect();

    print_table(&["SCENARIO", "ENTITIES", "METRICS"], &rows);
    Ok(())
}
