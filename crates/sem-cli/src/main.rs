//! Demo CLI driving Building, Execution, and Reporting over a canned plan,
//! without a live LLM (§4.9).

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod fixtures;
mod scenarios;

use cli::Cli;

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<()> = match &cli.command {
        cli::Commands::ListEntities => commands::list_entities::execute(&cli.global),
        cli::Commands::ListScenarios => commands::list_scenarios::execute(),
        cli::Commands::Run(args) => commands::run::execute(args, &cli.global).await,
    };

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
