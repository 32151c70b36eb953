// src/constants.rs

//! Names shared across modules.

/// The name of the backing file for local aliases (in the invocation directory).
pub const LOCAL_STORE_FILENAME: &str = ".ez_cli.json";

/// The name of the backing file for global aliases (in the user's home directory).
pub const GLOBAL_STORE_FILENAME: &str = ".ez_cli_global.json";

/// Test-mode counterpart of [`LOCAL_STORE_FILENAME`].
pub const LOCAL_TEST_STORE_FILENAME: &str = ".ez_cli_test.json";

/// Test-mode counterpart of [`GLOBAL_STORE_FILENAME`].
pub const GLOBAL_TEST_STORE_FILENAME: &str = ".ez_cli_global_test.json";

/// The directory (inside the system temp dir) that holds both test-mode backing files.
pub const TEST_STORE_DIR: &str = "ez_cli_tests";

/// Environment flag that redirects both scopes into [`TEST_STORE_DIR`].
pub const TEST_MODE_ENV: &str = "EZCLI_UNIT_TEST";

/// Environment variable overriding the shell program used to run aliases.
pub const SHELL_ENV: &str = "EZ_SHELL";

/// The name of the application directory inside the system config dir.
pub const CONFIG_DIR_NAME: &str = "ez";

/// The name of the optional settings file (in `~/.config/ez/`).
pub const SETTINGS_FILENAME: &str = "settings.toml";

/// Names that belong to built-in commands and can never be used as alias names.
pub const RESERVED_NAMES: &[&str] = &["add", "remove", "list", "help"];
