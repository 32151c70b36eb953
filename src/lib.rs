//! `ez` stores short aliases for shell commands, in a local or a global scope, and
//! runs them sequentially or in parallel.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

/// Argument parsing, dispatch and the per-command handlers.
pub mod cli;
/// File names, environment variables and reserved names.
pub mod constants;
/// Alias storage, scopes, settings and the execution coordinator.
pub mod core;
/// Serializable data types.
pub mod models;
/// Child processes, the child registry and signal relay.
pub mod system;
