// src/system/shell.rs

//! Picks the shell that `set` starts.

use crate::core::shell_words::{self, ShellWordsError, SplitCommand};
use thiserror::Error;

/// Failures while choosing the session shell.
#[derive(Error, Debug)]
pub enum ShellError {
    /// No shell is configured anywhere.
    #[error("Can not detect the current shell. Set `shell` in the config file or the SHELL variable.")]
    NoShell,
    /// The chosen shell line does not split.
    #[error("Invalid shell command line: {0}")]
    Parse(#[from] ShellWordsError),
}

/// Picks the shell command line for an interactive session.
///
/// Precedence: the `CTX_SHELL` override, the `shell` attribute of the config
/// file, then the ambient `SHELL`. Empty values count as unset.
pub fn select_shell_line(
    override_line: Option<String>,
    configured: Option<&str>,
    ambient: Option<String>,
) -> Option<String> {
    override_line
        .filter(|line| !line.trim().is_empty())
        .or_else(|| {
            configured
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
        })
        .or_else(|| ambient.filter(|line| !line.trim().is_empty()))
}

/// Resolves the shell to launch into its argv and the `NAME=value`
/// assignments that precede it on the command line.
pub fn resolve_shell_command(
    override_line: Option<String>,
    configured: Option<&str>,
    ambient: Option<String>,
) -> Result<SplitCommand, ShellError> {
    let line = select_shell_line(override_line, configured, ambient).ok_or(ShellError::NoShell)?;
    log::debug!("Using shell command line '{}'", line);

    let split = shell_words::split_with_envs(&line)?;
    if split.argv.is_empty() {
        return Err(ShellError::NoShell);
    }
    Ok(split)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let line = select_shell_line(
            Some("/bin/fish".to_string()),
            Some("/bin/zsh"),
            Some("/bin/bash".to_string()),
        );
        assert_eq!(line.as_deref(), Some("/bin/fish"));
    }

    #[test]
    fn test_configured_before_ambient() {
        let line = select_shell_line(None, Some("/bin/zsh -l"), Some("/bin/bash".to_string()));
        assert_eq!(line.as_deref(), Some("/bin/zsh -l"));
    }

    #[test]
    fn test_empty_values_fall_through() {
        let line = select_shell_line(Some(String::new()), Some("  "), Some("/bin/bash".to_string()));
        assert_eq!(line.as_deref(), Some("/bin/bash"));
    }

    #[test]
    fn test_no_shell_anywhere() {
        let result = resolve_shell_command(None, None, None);
        assert!(matches!(result, Err(ShellError::NoShell)));
    }

    #[test]
    fn test_assignments_are_split_off() {
        let split = resolve_shell_command(None, Some("ZDOTDIR=/tmp/z /bin/zsh -i"), None).unwrap();
        assert_eq!(split.envs, vec!["ZDOTDIR=/tmp/z"]);
        assert_eq!(split.argv, vec!["/bin/zsh", "-i"]);
    }

    #[test]
    fn test_only_assignments_is_no_shell() {
        let result = resolve_shell_command(None, Some("A=1"), None);
        assert!(matches!(result, Err(ShellError::NoShell)));
    }
}
