//! # Handler for the `remove` command
//!
//! Removes an alias from the local scope, or from the global scope with `--global`.
//! Removing a name that is not stored prints a diagnostic and leaves the file as it was.

use anyhow::Result;
use clap::{CommandFactory, Parser};

use crate::{
    cli::handlers::commons,
    core::{
        alias_store::{self, RemoveOutcome},
        report,
    },
};

#[derive(Parser, Debug)]
#[command(name = "remove", no_binary_name = true, about = t!("remove.about"))]
struct RemoveArgs {
    /// Remove the alias from the global collection.
    #[arg(short, long)]
    global: bool,

    /// The name of the alias to remove.
    name: String,
}

/// The main handler for the `remove` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    let remove_args: RemoveArgs = commons::parse_args(&args);
    let scope = commons::scope_from_flag(remove_args.global);
    let name = remove_args.name.trim();

    match alias_store::remove_alias(name, scope)? {
        RemoveOutcome::Removed => {
            println!(t!("remove.success"), alias = commons::invocation(name));
        }
        RemoveOutcome::NotFound => {
            report::print_error(&format!(t!("remove.error.not_found"), name = name));
        }
    }
    Ok(())
}

/// Prints the clap help of `remove`.
pub fn print_help() -> std::io::Result<()> {
    RemoveArgs::command().print_help()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flag_is_optional() {
        let args = RemoveArgs::try_parse_from(["build"]).expect("valid");
        assert!(!args.global);
        assert_eq!(args.name, "build");

        let args = RemoveArgs::try_parse_from(["-g", "build"]).expect("valid");
        assert!(args.global);
    }

    #[test]
    fn name_is_required() {
        assert!(RemoveArgs::try_parse_from(Vec::<String>::new()).is_err());
    }
}
