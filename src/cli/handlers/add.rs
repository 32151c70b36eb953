//! # Handler for the `add` command
//!
//! Stores a new alias (or overwrites an existing one) in the local scope, or in the
//! global scope with `--global`.
//!
//! Validation happens before the store is touched: reserved names and empty command
//! lists are rejected, so a refused `add` never writes the backing file.

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser};
use colored::*;

use crate::{
    cli::handlers::commons,
    constants::RESERVED_NAMES,
    core::alias_store,
    models::{AliasDefinition, ExecutionMode},
};

// --- Command Argument Parsing ---

#[derive(Parser, Debug)]
#[command(name = "add", no_binary_name = true, about = t!("add.about"))]
struct AddArgs {
    /// Alias executes all commands in parallel.
    #[arg(short = 'p', long)]
    parallel: bool,

    /// A textual description; does not affect functionality.
    #[arg(short, long)]
    description: Option<String>,

    /// Store the alias globally, runnable from any directory.
    #[arg(short, long)]
    global: bool,

    /// The name by which to call this alias.
    name: String,

    /// The command(s) to save.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    commands: Vec<String>,
}

// --- Main Handler ---

/// The main handler for the `add` command.
///
/// # Arguments
/// * `args` - The arguments following `add` (e.g., `-p build "cargo build" "npm run build"`).
pub fn handle(args: Vec<String>) -> Result<()> {
    let add_args: AddArgs = commons::parse_args(&args);

    let name = validate_alias_name(&add_args.name)?;
    if add_args.commands.is_empty() {
        return Err(anyhow!(t!("add.error.no_commands")));
    }

    let mode = if add_args.parallel {
        ExecutionMode::Parallel
    } else {
        ExecutionMode::Sequential
    };
    let definition = AliasDefinition::new(mode, add_args.commands, add_args.description);
    let commands_description = definition.commands_description();
    let scope = commons::scope_from_flag(add_args.global);

    alias_store::add_alias(&name, definition, scope)?;

    let alias = commons::invocation(&name);
    println!(
        t!("add.success"),
        alias = alias,
        commands = commands_description.blue().bold(),
        context = scope.run_context_description()
    );
    Ok(())
}

/// Prints the clap help of `add`.
pub fn print_help() -> std::io::Result<()> {
    AddArgs::command().print_help()
}

// --- Helper Functions ---

/// Rejects empty names and the names of built-in commands.
fn validate_alias_name(raw_name: &str) -> Result<String> {
    let name = raw_name.trim();
    if name.is_empty() {
        return Err(anyhow!(t!("add.error.empty_name")));
    }
    if RESERVED_NAMES.contains(&name.to_lowercase().as_str()) {
        return Err(anyhow!(t!("add.error.protected"), name = name));
    }
    Ok(name.to_string())
}
