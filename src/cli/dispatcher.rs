//! Maps the first argument to a built-in command, a help topic or an alias.

use anyhow::Result;
use clap::CommandFactory;

use crate::{
    cli::{Cli, handlers},
    core::report,
};

// --- Command Definition and Registry ---

/// Defines a built-in command, its aliases, its handler and its help printer.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>) -> Result<()>,
    help: fn() -> std::io::Result<()>,
}

/// The single source of truth for all built-in commands. Every name here must also be
/// listed in `constants::RESERVED_NAMES`.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "add",
        aliases: &[],
        handler: handlers::add::handle,
        help: handlers::add::print_help,
    },
    CommandDefinition {
        name: "list",
        aliases: &[],
        handler: handlers::list::handle,
        help: handlers::list::print_help,
    },
    CommandDefinition {
        name: "remove",
        aliases: &[],
        handler: handlers::remove::handle,
        help: handlers::remove::print_help,
    },
];

/// Finds a built-in command by its name or alias. Matching is case-insensitive.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    let name = name.to_lowercase();
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name.as_str()))
}

/// Routes the raw argument list.
///
/// - no arguments, `-h`, `--help`: top-level help
/// - `--version`: version
/// - `help [command]`: help of that command
/// - a built-in command name: its handler gets the remaining arguments
/// - anything else: the name of an alias to execute
pub async fn dispatch(args: Vec<String>) -> Result<()> {
    let mut args = args.into_iter();
    let Some(first) = args.next() else {
        Cli::command().print_help()?;
        return Ok(());
    };
    let rest: Vec<String> = args.collect();

    match first.to_lowercase().as_str() {
        "-h" | "--help" => {
            Cli::command().print_help()?;
            return Ok(());
        }
        "-v" | "--version" => {
            print!("{}", Cli::command().render_version());
            return Ok(());
        }
        "help" => return print_help_for(rest.first().map(String::as_str)),
        _ => {}
    }

    if let Some(command) = find_command(&first) {
        log::debug!("Dispatching built-in command '{}'", command.name);
        return (command.handler)(rest);
    }

    if !rest.is_empty() {
        log::debug!("Ignoring extra arguments for alias '{}': {:?}", first, rest);
    }
    handlers::execute::handle(&first).await
}

fn print_help_for(topic: Option<&str>) -> Result<()> {
    match topic {
        None => Cli::command().print_help()?,
        Some(topic) => match find_command(topic) {
            Some(command) => (command.help)()?,
            None => {
                report::print_error(&format!(t!("help.error.unknown_topic"), topic = topic));
                Cli::command().print_help()?;
            }
        },
    }
    Ok(())
}
