//! The top-level parser. Everything after `ez` is collected and routed by the dispatcher.

use clap::Parser;

/// Routes the first argument to a built-in command or to alias execution.
pub mod dispatcher;
/// One handler per built-in command.
pub mod handlers;

/// ez: short, memorable names for the commands you run all the time.
#[derive(Parser, Debug)]
#[command(
    name = "ez",
    author,
    version,
    about = t!("cli.about"),
    long_about = None,
    after_help = t!("cli.after_help"),
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
// `help` is dispatched by hand so that `ez help add` shows the `add` help.
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// A built-in command (`add`, `remove`, `list`, `help`) or the name of an alias,
    /// followed by its arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
