// src/cli/handlers/commons.rs

//! Shared functions used by multiple handlers.

use clap::Parser;
use colored::{ColoredString, Colorize};

use crate::core::scope::Scope;

/// Parses handler arguments. Help requests and usage errors are printed by clap, which
/// then exits with its own status code (0 for help, 2 for usage errors).
pub fn parse_args<T: Parser>(args: &[String]) -> T {
    T::try_parse_from(args).unwrap_or_else(|e| e.exit())
}

/// Maps the `--global` flag onto a scope.
pub fn scope_from_flag(global: bool) -> Scope {
    if global { Scope::Global } else { Scope::Local }
}

/// The way an alias is invoked, highlighted: `ez <name>`.
pub fn invocation(name: &str) -> ColoredString {
    format!("ez {}", name).blue().bold()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flag_selects_global_scope() {
        assert_eq!(scope_from_flag(true), Scope::Global);
        assert_eq!(scope_from_flag(false), Scope::Local);
    }
}
