// src/models.rs

//! Serializable data types shared by the store, the settings loader and the executor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

// --- ALIAS MODELS (persisted in the backing files) ---

/// How the command list of an alias is interpreted at execution time.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// All commands are joined with spaces and run as one shell line.
    #[default]
    Sequential,
    /// Every command is an independent shell line, run concurrently.
    Parallel,
}

/// A stored alias: one or more shell command lines plus the mode that runs them.
///
/// Immutable once built. An empty `commands` list is representable, but the `add`
/// handler refuses to construct one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AliasDefinition {
    // Files written by older releases use `executionType`.
    #[serde(alias = "executionType")]
    execution_mode: ExecutionMode,
    commands: Vec<String>,
    description: Option<String>,
}

impl AliasDefinition {
    /// Builds a definition. Validation of names and commands is the caller's job.
    pub fn new(
        execution_mode: ExecutionMode,
        commands: Vec<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            execution_mode,
            commands,
            description,
        }
    }

    /// Sequential or parallel.
    pub fn execution_mode(&self) -> ExecutionMode {
        self.execution_mode
    }

    /// The stored command tokens, in the order they were given.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// The free-text description, if one was given.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// A one-line, human-readable rendering of the command list.
    ///
    /// Parallel commands are separated by `" | "` purely for display; they are never piped.
    pub fn commands_description(&self) -> String {
        match self.execution_mode {
            ExecutionMode::Sequential => self.commands.join(" "),
            ExecutionMode::Parallel => self.commands.join(" | "),
        }
    }

    /// The single shell line run for a sequential alias.
    pub fn joined_command_line(&self) -> String {
        self.commands.join(" ")
    }
}

/// The on-disk document of one scope: `{ "aliases": { <name>: <definition> } }`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasDocument {
    /// Alias name to definition, kept sorted by name.
    pub aliases: BTreeMap<String, AliasDefinition>,
}

// --- SETTINGS MODELS (optional `settings.toml`) ---

/// The shell used to interpret every alias command line.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Shell executable. `~` and `$VAR` are expanded when loaded from settings.
    pub program: PathBuf,
    /// Arguments placed before the command line, e.g. `-c`.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        if cfg!(target_os = "windows") {
            Self {
                program: PathBuf::from("cmd"),
                args: vec!["/C".to_string()],
            }
        } else {
            Self {
                program: PathBuf::from("/bin/sh"),
                args: vec!["-c".to_string()],
            }
        }
    }
}

/// User settings read from `settings.toml`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Shell used to run alias commands.
    #[serde(default)]
    pub shell: ShellConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alias(mode: ExecutionMode, commands: &[&str]) -> AliasDefinition {
        AliasDefinition::new(
            mode,
            commands.iter().map(|c| c.to_string()).collect(),
            None,
        )
    }

    #[test]
    fn sequential_description_joins_with_spaces() {
        let def = alias(ExecutionMode::Sequential, &["ls", "-l", "-a"]);
        assert_eq!(def.commands_description(), "ls -l -a");
        assert_eq!(def.joined_command_line(), "ls -l -a");
    }

    #[test]
    fn parallel_description_uses_display_separator() {
        let def = alias(ExecutionMode::Parallel, &["ls", "-l", "-a"]);
        assert_eq!(def.commands_description(), "ls | -l | -a");
    }

    #[test]
    fn definition_serializes_with_camel_case_and_null_description() {
        let def = alias(ExecutionMode::Parallel, &["echo a", "echo b"]);
        let value = serde_json::to_value(&def).expect("serialize");
        assert_eq!(value["executionMode"], "parallel");
        assert_eq!(value["commands"][1], "echo b");
        assert!(value["description"].is_null());
    }

    #[test]
    fn legacy_execution_type_key_is_accepted() {
        let json = r#"{ "executionType": "sequential", "commands": ["make"] }"#;
        let def: AliasDefinition = serde_json::from_str(json).expect("deserialize");
        assert_eq!(def.execution_mode(), ExecutionMode::Sequential);
        assert_eq!(def.commands(), ["make".to_string()]);
        assert_eq!(def.description(), None);
    }

    #[test]
    fn unknown_execution_mode_is_rejected() {
        let json = r#"{ "executionMode": "sideways", "commands": ["make"] }"#;
        assert!(serde_json::from_str::<AliasDefinition>(json).is_err());
    }

    #[test]
    fn settings_default_shell_when_section_missing() {
        let settings: Settings = toml::from_str("").expect("parse");
        assert_eq!(settings.shell, ShellConfig::default());
    }
}
