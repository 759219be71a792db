//! `run` command implementation: drives Building -> Execution -> Reporting
//! over a canned `FinalizedPlan`, per §4.9.

use anyhow::{anyhow, Context, Result};
use sem_agent::{OrchestratorState, Phase, StepOutcome, TerminationReason, TransportEvent};
use sem_core::registry::EntityRegistry;
use sem_db::Warehouse;
use sem_guard::{estimate_cost, ExecutionOutcome, RepairContext};
use sem_join::plan_join_path;
use sem_report::{explain_failure, explain_results, format_results, sanity_check};
use sem_sql::{render_sql, validate_semantic, validate_syntax};
use std::collections::HashSet;

use crate::cli::{GlobalArgs, RunArgs};
use crate::context::RuntimeContext;
use crate::scenarios;

pub async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;

    let plan = scenarios::by_name(&args.scenario)
        .ok_or_else(|| anyhow!("unknown scenario '{}' (see `sas list-scenarios`)", args.scenario))?;
    plan.validate().context("canned plan failed structural validation")?;

    let mut state = OrchestratorState::new(ctx.config.step_ceiling);
    // Planning itself requires a live LLM client (§4.9); the plan above
    // stands in for its output, so we drive the state machine from its
    // terminal tool onward.
    advance(&mut state, "finalize_plan")?;
    ctx.verbose(&format!("phase -> {}", state.phase()));

    let mut required: Vec<String> = plan.selected_entities.clone();
    let mut seen: HashSet<String> = required.iter().cloned().collect();
    for edge in &plan.join_graph {
        for name in [&edge.from, &edge.to] {
            if seen.insert(name.clone()) {
                required.push(name.clone());
            }
        }
    }

    let entities = ctx.store.load_many(&required).context("failed to load entity descriptors")?;
    let registry = EntityRegistry::from_entities(entities);

    advance(&mut state, "compute_join_path")?;
    let join_path =
        plan_join_path(&plan.selected_entities[0], &plan.selected_entities, &registry).context("join planning failed")?;

    let sql = render_sql(&plan, &registry).context("SQL rendering failed")?;
    advance(&mut state, "build_sql")?;

    let semantic_report = validate_semantic(&plan, &registry, &ctx.config);
    let syntax_report = validate_syntax(&sql);
    advance(&mut state, "validate_sql")?;
    if !semantic_report.ok || !syntax_report.ok {
        for issue in semantic_report.issues.iter().chain(syntax_report.issues.iter()) {
            eprintln!("validation [{}]: {}", issue.code, issue.message);
        }
        state.fail_fatal("validator rejected the rendered SQL");
        return Err(anyhow!("validation failed; see issues above"));
    }

    println!("-- rendered SQL --");
    println!("{sql}");

    let outcome = advance(&mut state, "finalize_build")?;
    debug_assert!(matches!(outcome, StepOutcome::Advanced { phase: Phase::Execution }));

    if let Ok(explain_plan) = ctx.warehouse.explain(&sql).await {
        let cost = estimate_cost(&explain_plan);
        advance(&mut state, "estimate_cost")?;
        println!("\n-- cost estimate --\nscore: {}/100", cost.score);
        for recommendation in &cost.recommendations {
            println!("- {recommendation}");
        }
    } else {
        advance(&mut state, "estimate_cost")?;
    }

    let repair_ctx = RepairContext {
        registry: &registry,
        alias_by_entity: &join_path.alias_by_entity,
    };
    let execution = ctx.guard.execute_with_repair(&sql, &repair_ctx, &ctx.warehouse).await;
    advance(&mut state, "execute_with_repair")?;

    match &execution {
        ExecutionOutcome::Success(result) => {
            println!("\n-- execution --");
            println!(
                "rows: {}  truncated: {}  repaired: {}  cached: {}  took: {}ms",
                result.rows.len(),
                result.truncated,
                result.repair.repaired,
                result.from_cache,
                result.execution_time_ms
            );
            if let Some(reason) = &result.repair.repair_reason {
                println!("repair reason: {reason}");
            }
            print_rows(&result.columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(), &result.rows);

            let sanity = sanity_check(result);
            advance(&mut state, "sanity_check")?;
            if sanity.has_findings() {
                println!("\n-- sanity check --");
                for (column, rate) in &sanity.null_rates {
                    if *rate > 0.0 {
                        println!("{column}: {:.0}% null", rate * 100.0);
                    }
                }
                for (column, count) in &sanity.negative_counts {
                    println!("{column}: {count} negative value(s)");
                }
                for flagged in &sanity.implausible_percentages {
                    println!("{}: implausible percentage value {}", flagged.column, flagged.value);
                }
            }

            let formatted = format_results(result);
            advance(&mut state, "format_results")?;
            println!(
                "\n-- csv --\n{} total row(s), {} in preview, truncated: {}",
                formatted.total_rows,
                formatted.preview.len(),
                formatted.csv_truncated
            );

            let narrative = explain_results(result, &sanity);
            advance(&mut state, "explain_results")?;
            println!("\n-- narrative --");
            println!("{} (confidence: {:.2})", narrative.text, narrative.confidence);
        }
        ExecutionOutcome::Failure(failure) => {
            println!("\n-- execution failed --");
            println!("error: {}", failure.error);
            println!("repaired: {}  attempted sql:\n{}", failure.repaired, failure.attempted_sql);

            // No rows to sanity-check or format, but Reporting still runs
            // its full tool sequence over a failed execution (§4.7, §7).
            advance(&mut state, "sanity_check")?;
            advance(&mut state, "format_results")?;

            let narrative = explain_failure(failure);
            advance(&mut state, "explain_results")?;
            println!("\n-- narrative --");
            println!("{} (confidence: {:.2})", narrative.text, narrative.confidence);
        }
    }

    let termination = advance(&mut state, "finalize_report")?;
    match termination {
        StepOutcome::Terminated { reason: TerminationReason::ReportComplete } => {}
        other => return Err(anyhow!("expected the report to complete, got {other:?}")),
    }

    Ok(())
}

fn advance(state: &mut OrchestratorState, tool_name: &str) -> Result<StepOutcome> {
    let outcome = state
        .record_step(tool_name)
        .with_context(|| format!("orchestrator rejected tool '{tool_name}'"))?;
    let event = TransportEvent::from_outcome(tool_name, &outcome);
    log::debug!("transport event: {}", serde_json::to_string(&event).unwrap_or_default());
    Ok(outcome)
}

fn print_rows(columns: &[&str], rows: &[Vec<serde_json::Value>]) {
    use crate::commands::common::print_table;
    let rendered: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();
    print_table(columns, &rendered);
}

