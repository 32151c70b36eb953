//! # System Interaction Layer
//!
//! This module provides abstractions for interacting with the underlying operating system.
//! It serves as a boundary between the alias logic and the specifics of process
//! management and signal handling.
//!
//! ## Modules
//!
//! - **`executor`**: Spawns shell command lines as child processes, wires their standard
//!   streams, measures their wall time and keeps them registered while they run.
//! - **`process_registry`**: The process-wide table of live children, guarded by a
//!   single lock.
//! - **`signals`**: Relays interrupt, terminate, stop and continue signals received by
//!   `ez` to every registered child.

pub mod executor;
pub mod process_registry;
/// Relaying of lifecycle signals to registered children.
pub mod signals;
