//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// A demo harness that drives Building, Execution, and Reporting over a
/// canned plan without a live LLM.
#[derive(Parser, Debug)]
#[command(name = "sas")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the demo project directory (holds semantic.yml)
    #[arg(short = 'p', long, global = true, default_value = "crates/sem-cli/demo")]
    pub project_dir: String,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the entities and catalog cards the demo project declares
    ListEntities,

    /// List the canned scenarios `run` can drive
    ListScenarios,

    /// Drive Building -> Execution -> Reporting over a named canned scenario
    Run(RunArgs),
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Name of the canned scenario to run (see `list-scenarios`)
    pub scenario: String,
}
