// src/core/env_resolver.rs

//! Turns `env` definitions into values.

use crate::{
    core::shell_words::{self, ShellWordsError},
    models::{EnvDefinition, ResolutionKind},
    system::executor::{self, LaunchError},
};
use std::fs;
use thiserror::Error;

/// Failures while computing the value of one variable.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// A `file` source could not be read.
    #[error("env \"{name}\": could not read file '{path}': {source}")]
    Io {
        /// Variable name.
        name: String,
        /// The file that was requested.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A `command` source is not a valid command line.
    #[error("env \"{name}\": could not parse command line: {source}")]
    Parse {
        /// Variable name.
        name: String,
        /// Underlying error.
        #[source]
        source: ShellWordsError,
    },
    /// A `command` source could not be run or failed.
    #[error("env \"{name}\": {source}")]
    Exec {
        /// Variable name.
        name: String,
        /// Underlying error.
        #[source]
        source: LaunchError,
    },
    /// The `type` attribute named no known resolution.
    #[error("unknown environment resolution type: {0}")]
    UnknownType(String),
}

/// Computes the runtime value of one environment variable definition.
pub fn resolve(definition: &EnvDefinition) -> Result<String, ResolutionError> {
    log::debug!(
        "Resolving env '{}' (type: {})",
        definition.name,
        definition.kind
    );

    match &definition.kind {
        ResolutionKind::Static => Ok(definition.source.clone()),
        ResolutionKind::File => resolve_file(definition),
        ResolutionKind::Command => resolve_command(definition),
        ResolutionKind::Unknown(kind) => Err(ResolutionError::UnknownType(kind.clone())),
    }
}

/// The file's contents, verbatim.
fn resolve_file(definition: &EnvDefinition) -> Result<String, ResolutionError> {
    fs::read_to_string(&definition.source).map_err(|e| ResolutionError::Io {
        name: definition.name.clone(),
        path: definition.source.clone(),
        source: e,
    })
}

/// Runs `[NAME=value ...] cmd args...` and returns its trimmed stdout. The
/// leading assignments are added to the ambient environment of the command.
fn resolve_command(definition: &EnvDefinition) -> Result<String, ResolutionError> {
    let split =
        shell_words::split_with_envs(&definition.source).map_err(|e| ResolutionError::Parse {
            name: definition.name.clone(),
            source: e,
        })?;

    executor::capture_output(&split.argv, &split.envs).map_err(|e| ResolutionError::Exec {
        name: definition.name.clone(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn def(kind: ResolutionKind, source: &str) -> EnvDefinition {
        EnvDefinition {
            name: "VAR".to_string(),
            kind,
            source: source.to_string(),
        }
    }

    #[test]
    fn test_static_is_verbatim() {
        let value = resolve(&def(ResolutionKind::Static, "  a b  ")).unwrap();
        assert_eq!(value, "  a b  ");
    }

    #[test]
    fn test_file_returns_contents() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"secret\n").unwrap();
        file.flush().unwrap();

        let path = file.path().to_string_lossy().to_string();
        let value = resolve(&def(ResolutionKind::File, &path)).unwrap();
        assert_eq!(value, "secret\n");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = resolve(&def(ResolutionKind::File, "/nonexistent/ctx/secret"));
        assert!(matches!(result, Err(ResolutionError::Io { .. })));
    }

    #[test]
    fn test_command_output_is_trimmed() {
        let value = resolve(&def(ResolutionKind::Command, "FOO=1 echo hi")).unwrap();
        assert_eq!(value, "hi");
    }

    #[test]
    fn test_command_sees_inline_assignments() {
        let value = resolve(&def(
            ResolutionKind::Command,
            r#"FOO=1 BAR="two words" /bin/sh -c 'echo "$FOO:$BAR"'"#,
        ))
        .unwrap();
        assert_eq!(value, "1:two words");
    }

    #[test]
    fn test_command_unbalanced_quotes_is_parse_error() {
        let result = resolve(&def(ResolutionKind::Command, "echo 'oops"));
        assert!(matches!(result, Err(ResolutionError::Parse { .. })));
    }

    #[test]
    fn test_command_failure_is_exec_error() {
        let result = resolve(&def(ResolutionKind::Command, "/bin/sh -c 'exit 1'"));
        assert!(matches!(
            result,
            Err(ResolutionError::Exec {
                source: LaunchError::NonZeroExitStatus(_, 1),
                ..
            })
        ));

        let result = resolve(&def(ResolutionKind::Command, "/nonexistent/ctx-cmd"));
        assert!(matches!(
            result,
            Err(ResolutionError::Exec {
                source: LaunchError::ExecNotFound(_),
                ..
            })
        ));
    }

    #[test]
    fn test_empty_command_is_exec_error() {
        let result = resolve(&def(ResolutionKind::Command, "FOO=1"));
        assert!(matches!(
            result,
            Err(ResolutionError::Exec {
                source: LaunchError::EmptyCommand,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_type_names_the_kind() {
        let result = resolve(&def(ResolutionKind::Unknown("vault".to_string()), "x"));
        let err = result.unwrap_err();
        assert!(matches!(err, ResolutionError::UnknownType(ref k) if k == "vault"));
        assert!(err.to_string().contains("vault"));
    }
}
