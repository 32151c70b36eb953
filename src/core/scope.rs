// src/core/scope.rs

//! Where each scope keeps its backing file.

use crate::constants::{
    GLOBAL_STORE_FILENAME, GLOBAL_TEST_STORE_FILENAME, LOCAL_STORE_FILENAME,
    LOCAL_TEST_STORE_FILENAME, TEST_MODE_ENV, TEST_STORE_DIR,
};
use std::env;
use std::fs;
use std::path::PathBuf;

/// The storage domain an alias belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `.ez_cli.json` in the invocation directory.
    Local,
    /// `.ez_cli_global.json` in the user's home directory.
    Global,
}

impl Scope {
    /// Resolves the backing file of this scope.
    ///
    /// In test mode (see [`is_test_mode`]) both scopes live in the same temporary
    /// directory under fixed, distinct filenames, regardless of the invocation directory.
    pub fn resolve(self) -> PathBuf {
        if is_test_mode() {
            let dir = test_store_dir();
            return match self {
                Self::Local => dir.join(LOCAL_TEST_STORE_FILENAME),
                Self::Global => dir.join(GLOBAL_TEST_STORE_FILENAME),
            };
        }

        match self {
            Self::Local => invocation_dir().join(LOCAL_STORE_FILENAME),
            Self::Global => home_dir().join(GLOBAL_STORE_FILENAME),
        }
    }

    /// Display name, `Local` or `Global`.
    pub fn title(self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::Global => "Global",
        }
    }

    /// Tells the user where an alias of this scope can be run from.
    pub fn run_context_description(self) -> &'static str {
        match self {
            Self::Local => t!("scope.local.run_context"),
            Self::Global => t!("scope.global.run_context"),
        }
    }
}

/// Returns `true` when the test-isolation flag is set to a truthy value.
pub fn is_test_mode() -> bool {
    env::var(TEST_MODE_ENV)
        .map(|value| matches!(value.trim(), "1" | "true" | "TRUE" | "yes"))
        .unwrap_or(false)
}

/// The isolated directory used by both scopes in test mode. Created on demand.
fn test_store_dir() -> PathBuf {
    let dir = env::temp_dir().join(TEST_STORE_DIR);
    if let Err(e) = fs::create_dir_all(&dir) {
        log::warn!("Could not create test directory '{}': {}", dir.display(), e);
    }
    dir
}

fn invocation_dir() -> PathBuf {
    match env::current_dir() {
        Ok(dir) => dunce::simplified(&dir).to_path_buf(),
        Err(e) => {
            log::warn!("Could not read the current directory ({}); using '.'", e);
            PathBuf::from(".")
        }
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| {
        log::warn!("Could not find the home directory; using '.' for global aliases");
        PathBuf::from(".")
    })
}
