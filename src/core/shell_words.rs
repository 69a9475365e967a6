// src/core/shell_words.rs

//! POSIX-style word splitting for the command lines found in the config.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref ASSIGNMENT_RE: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*=").expect("assignment pattern is valid");
}

/// Failures while splitting a command line.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShellWordsError {
    /// Quotes or escapes that never close.
    #[error("Command line has unbalanced quotes or a trailing escape: {0}")]
    Unbalanced(String),
}

/// A command line split into its leading `NAME=value` assignments and the argv.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SplitCommand {
    /// Assignments in `NAME=value` form, quotes already removed.
    pub envs: Vec<String>,
    /// Program and arguments.
    pub argv: Vec<String>,
}

/// Splits a command line the way a POSIX shell would, peeling off any
/// `NAME=value` tokens that precede the program name.
///
/// `FOO=1 BAR="a b" cmd --x=1` yields envs `["FOO=1", "BAR=a b"]` and argv
/// `["cmd", "--x=1"]`. Assignments after the program name are arguments.
pub fn split_with_envs(line: &str) -> Result<SplitCommand, ShellWordsError> {
    let tokens =
        shlex::split(line).ok_or_else(|| ShellWordsError::Unbalanced(line.to_string()))?;

    let assignments = tokens
        .iter()
        .take_while(|token| ASSIGNMENT_RE.is_match(token))
        .count();

    let mut envs = tokens;
    let argv = envs.split_off(assignments);
    log::trace!("Split '{}' into envs={:?} argv={:?}", line, envs, argv);

    Ok(SplitCommand { envs, argv })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_command() {
        let split = split_with_envs("echo hi there").unwrap();
        assert!(split.envs.is_empty());
        assert_eq!(split.argv, vec!["echo", "hi", "there"]);
    }

    #[test]
    fn test_split_leading_assignments() {
        let split = split_with_envs(r#"FOO=1 BAR="a b" cmd --x=1 BAZ=2"#).unwrap();
        assert_eq!(split.envs, vec!["FOO=1", "BAR=a b"]);
        assert_eq!(split.argv, vec!["cmd", "--x=1", "BAZ=2"]);
    }

    #[test]
    fn test_split_only_assignments() {
        let split = split_with_envs("A=1 B=").unwrap();
        assert_eq!(split.envs, vec!["A=1", "B="]);
        assert!(split.argv.is_empty());
    }

    #[test]
    fn test_split_quoted_program_is_not_assignment() {
        // `=` inside a name that is not an identifier is a plain word.
        let split = split_with_envs("1X=2 run").unwrap();
        assert!(split.envs.is_empty());
        assert_eq!(split.argv, vec!["1X=2", "run"]);
    }

    #[test]
    fn test_split_unbalanced_quotes_fail() {
        let result = split_with_envs("echo 'unterminated");
        assert_eq!(
            result,
            Err(ShellWordsError::Unbalanced("echo 'unterminated".to_string()))
        );
    }

    #[test]
    fn test_split_empty_line() {
        let split = split_with_envs("   ").unwrap();
        assert_eq!(split, SplitCommand::default());
    }
}
