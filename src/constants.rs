// src/constants.rs

//! Names shared between the process boundary and the rest of the crate.

/// Environment variable carrying the comma-joined active context path.
pub const ACTIVE_PATH_VAR: &str = "CTX_ACTIVE";

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_VAR: &str = "CTX_CONFIG";

/// Environment variable overriding the shell launched by `set`.
pub const SHELL_OVERRIDE_VAR: &str = "CTX_SHELL";

/// The ambient shell of the user, used when nothing else is configured.
pub const AMBIENT_SHELL_VAR: &str = "SHELL";

/// Editor command used by `ctx edit`.
pub const EDITOR_VAR: &str = "EDITOR";

/// Default configuration file name, relative to the home directory.
pub const DEFAULT_CONFIG_FILENAME: &str = ".ctx.hcl";

/// Separator between context names in the active path.
pub const ACTIVE_PATH_SEPARATOR: &str = ",";

/// The external fuzzy picker.
pub const PICKER_COMMAND: &str = "fzf";

/// Flags passed to the picker.
pub const PICKER_ARGS: &[&str] = &["--ansi", "--no-preview"];

/// Variable through which the picker learns how to list candidates.
pub const PICKER_SOURCE_VAR: &str = "FZF_DEFAULT_COMMAND";
