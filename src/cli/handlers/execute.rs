//! # Alias execution
//!
//! Any first argument that is not a built-in command is treated as an alias name.
//! The local scope is searched first, then the global one. An unknown name is not an
//! error: a diagnostic is printed and `ez` exits successfully.

use anyhow::Result;
use colored::*;

use crate::{
    core::{alias_executor, alias_store::AliasStore, report, scope::Scope, settings},
    models::AliasDefinition,
    system::{
        executor::{ProcessRunner, StdStreams},
        process_registry, signals,
    },
};

/// Looks `name` up in the local scope, then in the global scope.
pub fn resolve_alias(name: &str) -> Result<Option<(Scope, AliasDefinition)>> {
    for scope in [Scope::Local, Scope::Global] {
        let store = AliasStore::load(scope)?;
        if let Some(definition) = store.lookup(name) {
            return Ok(Some((scope, definition.clone())));
        }
    }
    Ok(None)
}

/// Runs the alias called `name`, forwarding lifecycle signals to its children.
pub async fn handle(name: &str) -> Result<()> {
    let Some((scope, definition)) = resolve_alias(name)? else {
        report::print_error(&format!(
            t!("execute.error.unknown_alias"),
            name = name.blue().bold()
        ));
        return Ok(());
    };
    log::debug!("Resolved alias '{}' in {} scope.", name, scope.title());

    let settings = settings::load_settings()?;
    let registry = process_registry::global().clone();

    let relay = match signals::spawn_signal_relay(registry.clone()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("Signal relay unavailable, children will not be signalled: {}", e);
            None
        }
    };

    println!(
        "{}",
        format!(
            t!("execute.info.executing"),
            commands = definition.commands_description()
        )
        .green()
        .bold()
    );

    let runner = ProcessRunner::new(settings.shell, registry);
    let outcomes = alias_executor::execute(&definition, &runner, &StdStreams::default()).await;
    log::debug!("Alias '{}' finished {} job(s).", name, outcomes.len());

    if let Some(handle) = relay {
        handle.abort();
    }
    Ok(())
}
