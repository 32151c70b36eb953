// EN: src/bin/ez.rs

//! Command-line entry point for `ez`.

use anyhow::Result;
use clap::Parser;
use colored::*;
use ez::cli::{Cli, dispatcher};

/// The main entry point of the `ez` application.
/// It sets up logging, parses arguments, dispatches to the correct handler,
/// and performs centralized error handling.
#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()).await {
        // --- Centralized Error Handling ---
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);
    dispatcher::dispatch(cli.args).await
}
