// src/models.rs

//! In-memory model of the configuration file.
//!
//! The tree is built once by `core::config_loader` and is read-only afterwards.
//! Children are kept in declaration order, and lookups always pick the first
//! sibling with a matching name.

use std::fmt;

/// How the value of an environment variable is produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResolutionKind {
    /// The source string is the value.
    #[default]
    Static,
    /// The source string is a path; the value is the file's contents.
    File,
    /// The source string is a command line; the value is its trimmed stdout.
    Command,
    /// A `type` the loader did not recognise. Kept so that the failure is
    /// reported when the variable is resolved, not when the file is loaded.
    Unknown(String),
}

impl ResolutionKind {
    /// Maps the `type` attribute of an `env` block. Matching is case-sensitive.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "static" => Self::Static,
            "file" => Self::File,
            "command" => Self::Command,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for ResolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => f.write_str("static"),
            Self::File => f.write_str("file"),
            Self::Command => f.write_str("command"),
            Self::Unknown(name) => f.write_str(name),
        }
    }
}

/// One `env "<name>" { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvDefinition {
    /// Variable name, the block label.
    pub name: String,
    /// How `source` becomes the value.
    pub kind: ResolutionKind,
    /// Literal value, file path or command line, depending on `kind`.
    pub source: String,
}

/// One `context "<name>" { ... }` block, possibly holding nested contexts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Context {
    /// Context name, the block label.
    pub name: String,
    /// Text printed by `ctx prompt` while this context is active.
    pub prompt: Option<String>,
    /// Variables in declaration order.
    pub envs: Vec<EnvDefinition>,
    /// Nested contexts in declaration order.
    pub children: Vec<Context>,
}

/// The whole configuration file. Acts as the implicit parent of the
/// top-level contexts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    /// Command line of the shell started by `set`.
    pub shell: Option<String>,
    /// Top-level contexts.
    pub contexts: Vec<Context>,
}
