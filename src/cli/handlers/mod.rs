// src/cli/handlers/mod.rs

//! One module per built-in command, plus alias execution.

pub mod add;
/// Helpers shared by the handlers.
pub mod commons;
pub mod execute;
pub mod list;
pub mod remove;
