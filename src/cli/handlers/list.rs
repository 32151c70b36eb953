//! # Handler for the `list` command
//!
//! Prints the local aliases, then the global ones, one aligned row per alias.
//! With `--verbose`, each section header carries the backing-file path and each alias
//! is followed by its description.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::*;

use crate::{
    cli::handlers::commons,
    core::{alias_store::AliasStore, scope::Scope},
    models::AliasDefinition,
};

#[derive(Parser, Debug)]
#[command(name = "list", no_binary_name = true, about = t!("list.about"))]
struct ListArgs {
    /// Include file paths and descriptions in the output.
    #[arg(short, long)]
    verbose: bool,
}

/// The main handler for the `list` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    let list_args: ListArgs = commons::parse_args(&args);

    let local = AliasStore::load(Scope::Local)?;
    let global = AliasStore::load(Scope::Global)?;

    if local.is_empty() && global.is_empty() {
        println!("{}", t!("list.info.no_aliases"));
        return Ok(());
    }

    if !local.is_empty() {
        print_scope(&local, Scope::Local, list_args.verbose);
    }
    if !global.is_empty() {
        if !local.is_empty() {
            println!();
        }
        print_scope(&global, Scope::Global, list_args.verbose);
    }
    Ok(())
}

/// Prints the clap help of `list`.
pub fn print_help() -> std::io::Result<()> {
    ListArgs::command().print_help()
}

fn print_scope(store: &AliasStore, scope: Scope, verbose: bool) {
    let header = match scope {
        Scope::Local => t!("list.info.header_local"),
        Scope::Global => t!("list.info.header_global"),
    };
    if verbose {
        println!("{} ({})", header.bold(), scope.resolve().display());
    } else {
        println!("{}", header.bold());
    }

    for row in alias_rows(store) {
        println!(
            "{} {}",
            row.name_cell.blue().bold(),
            row.commands.green().bold()
        );
        if verbose && let Some(description) = row.description {
            println!("   {}", description);
        }
    }
}

/// One printable line of the listing, before coloring.
#[derive(Debug, PartialEq, Eq)]
struct AliasRow<'a> {
    /// `ez <name> ` padded to the longest name of the store.
    name_cell: String,
    commands: String,
    description: Option<&'a str>,
}

fn alias_rows(store: &AliasStore) -> Vec<AliasRow<'_>> {
    let width = store.longest_name_length();
    store
        .iter()
        .map(|(name, definition)| AliasRow {
            name_cell: pad_name(name, width),
            commands: definition.commands_description(),
            description: non_empty_description(definition),
        })
        .collect()
}

fn pad_name(name: &str, width: usize) -> String {
    let padding = width.saturating_sub(name.chars().count());
    format!("ez {} {}", name, " ".repeat(padding))
}

fn non_empty_description(definition: &AliasDefinition) -> Option<&str> {
    definition.description().filter(|d| !d.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExecutionMode;

    fn definition(mode: ExecutionMode, commands: &[&str], description: Option<&str>) -> AliasDefinition {
        AliasDefinition::new(
            mode,
            commands.iter().map(|c| c.to_string()).collect(),
            description.map(str::to_string),
        )
    }

    #[test]
    fn rows_are_aligned_to_the_longest_name() {
        let store = AliasStore::default()
            .with_added("b", definition(ExecutionMode::Sequential, &["make"], None))
            .with_added(
                "deploy",
                definition(ExecutionMode::Parallel, &["a", "b"], Some("ship it")),
            );

        let rows = alias_rows(&store);
        assert_eq!(
            rows,
            vec![
                AliasRow {
                    name_cell: "ez b      ".to_string(),
                    commands: "make".to_string(),
                    description: None,
                },
                AliasRow {
                    name_cell: "ez deploy ".to_string(),
                    commands: "a | b".to_string(),
                    description: Some("ship it"),
                },
            ]
        );
    }

    #[test]
    fn blank_descriptions_are_hidden() {
        let def = definition(ExecutionMode::Sequential, &["ls"], Some("  "));
        assert_eq!(non_empty_description(&def), None);
    }

    #[test]
    fn verbose_flag_parses() {
        assert!(ListArgs::try_parse_from(["-v"]).expect("valid").verbose);
        assert!(!ListArgs::try_parse_from(Vec::<String>::new()).expect("valid").verbose);
    }
}
