// src/core/settings.rs

//! The optional user settings file.

use crate::{
    constants::{CONFIG_DIR_NAME, SETTINGS_FILENAME, SHELL_ENV},
    core::scope::is_test_mode,
    models::Settings,
};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures while loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The file exists but could not be read.
    #[error("Could not read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`Settings`].
    #[error("Failed to parse settings file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// The shell path references an unset variable.
    #[error("Failed to expand shell path '{value}': {message}")]
    Expand { value: String, message: String },
}

/// Returns the path to the optional settings file (`~/.config/ez/settings.toml`).
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(SETTINGS_FILENAME))
}

/// Loads the effective settings for this invocation.
///
/// The settings file is optional. In test mode it is never read, so test runs do not
/// depend on the user's configuration. `EZ_SHELL` overrides the configured shell program.
pub fn load_settings() -> Result<Settings, SettingsError> {
    let mut settings = if is_test_mode() {
        Settings::default()
    } else {
        match settings_path() {
            Some(path) => load_settings_from(&path)?,
            None => Settings::default(),
        }
    };

    if let Ok(shell) = env::var(SHELL_ENV)
        && !shell.trim().is_empty()
    {
        log::debug!("Shell overridden by {}: {}", SHELL_ENV, shell);
        settings.shell.program = PathBuf::from(shell.trim());
    }

    settings.shell.program = expand_program(&settings.shell.program)?;
    Ok(settings)
}

/// Reads a settings file. A missing file yields the defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    log::debug!("Loading settings from '{}'.", path.display());
    toml::from_str(&content).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Expands `~` and environment variables in the configured shell program.
fn expand_program(program: &Path) -> Result<PathBuf, SettingsError> {
    let raw = program.to_string_lossy();
    let expanded = shellexpand::full(&raw).map_err(|e| SettingsError::Expand {
        value: raw.to_string(),
        message: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}
