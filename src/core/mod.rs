// src/core/mod.rs

//! Alias logic independent of how processes are spawned.

pub mod alias_executor;
pub mod alias_store;
/// Timing lines and diagnostics.
pub mod report;
pub mod scope;
pub mod settings;
