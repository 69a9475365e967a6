// src/system/executor.rs

//! Process launching: attached sessions and captured output.

use std::io::ErrorKind;
use std::process::{Command as StdCommand, ExitStatus, Stdio};
use thiserror::Error;

/// Failures while starting a process or collecting its result.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// The argv was empty.
    #[error("No command specified to run.")]
    EmptyCommand,
    /// The program is not on `PATH`.
    #[error("Command '{0}' was not found.")]
    ExecNotFound(String),
    /// Any other spawn or wait failure.
    #[error("Command '{0}' could not be executed: {1}")]
    SpawnFailed(String, #[source] std::io::Error),
    /// A captured command exited unsuccessfully.
    #[error("Command '{0}' exited with code {1}.")]
    NonZeroExitStatus(String, i32),
    /// A captured command wrote bytes that are not UTF-8.
    #[error("Command '{command}' produced output that was not valid UTF-8")]
    InvalidUtf8Output {
        /// Program name.
        command: String,
        /// Underlying error.
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Runs `argv` with exactly the given environment and the terminal streams of
/// this process, and blocks until it exits.
///
/// `env` is an ordered list of `NAME=value` entries. It replaces the
/// environment of the child instead of extending ours, and when a name occurs
/// more than once the last entry wins. Returns the child's exit code.
pub fn launch(argv: &[String], env: &[String]) -> Result<i32, LaunchError> {
    let mut command = build_command(argv)?;
    command.env_clear();
    apply_env(&mut command, env);

    log::debug!("Launching {:?} with {} environment entries", argv, env.len());
    run_attached(command, argv)
}

/// Like [`launch`], but the child inherits our environment, extended by
/// `extra_env`.
pub fn launch_inheriting(argv: &[String], extra_env: &[String]) -> Result<i32, LaunchError> {
    let mut command = build_command(argv)?;
    apply_env(&mut command, extra_env);

    log::debug!("Launching {:?}", argv);
    run_attached(command, argv)
}

fn run_attached(mut command: StdCommand, argv: &[String]) -> Result<i32, LaunchError> {
    let status = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| spawn_error(argv, e))?;
    let code = exit_code(status);
    log::debug!("'{}' exited with code {}", program_name(argv), code);
    Ok(code)
}

/// Runs `argv` with our environment extended by `extra_env` and returns its
/// trimmed standard output.
///
/// Stdin and stderr stay attached to the terminal so that commands which
/// prompt (password managers, pickers) keep working.
pub fn capture_output(argv: &[String], extra_env: &[String]) -> Result<String, LaunchError> {
    let mut command = build_command(argv)?;
    apply_env(&mut command, extra_env);

    log::debug!("Capturing output of {:?}", argv);
    let output = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|e| spawn_error(argv, e))?;

    if !output.status.success() {
        return Err(LaunchError::NonZeroExitStatus(
            program_name(argv).to_string(),
            exit_code(output.status),
        ));
    }

    let stdout = String::from_utf8(output.stdout).map_err(|e| LaunchError::InvalidUtf8Output {
        command: program_name(argv).to_string(),
        source: e,
    })?;
    Ok(stdout.trim().to_string())
}

fn build_command(argv: &[String]) -> Result<StdCommand, LaunchError> {
    let (program, args) = argv.split_first().ok_or(LaunchError::EmptyCommand)?;
    let mut command = StdCommand::new(program);
    command.args(args);
    Ok(command)
}

/// Applies `NAME=value` entries in order, so later duplicates win.
fn apply_env(command: &mut StdCommand, env: &[String]) {
    for (key, value) in env.iter().filter_map(|entry| split_env_entry(entry)) {
        command.env(key, value);
    }
}

fn spawn_error(argv: &[String], e: std::io::Error) -> LaunchError {
    let program = program_name(argv).to_string();
    if e.kind() == ErrorKind::NotFound {
        LaunchError::ExecNotFound(program)
    } else {
        LaunchError::SpawnFailed(program, e)
    }
}

fn program_name(argv: &[String]) -> &str {
    argv.first().map(String::as_str).unwrap_or_default()
}

/// Splits a `NAME=value` entry. Entries without `=` are ignored.
fn split_env_entry(entry: &str) -> Option<(&str, &str)> {
    match entry.split_once('=') {
        Some((key, value)) if !key.is_empty() => Some((key, value)),
        _ => {
            log::warn!("Ignoring malformed environment entry '{}'", entry);
            None
        }
    }
}

/// Maps an exit status to a shell-style exit code.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_launch_propagates_exit_code() {
        let code = launch(&argv(&["/bin/sh", "-c", "exit 3"]), &[]).unwrap();
        assert_eq!(code, 3);
    }

    #[test]
    fn test_launch_env_last_entry_wins() {
        let env = argv(&["A=first", "A=second", "B=x"]);
        let script = r#"[ "$A" = second ] && [ "$B" = x ]"#;
        let code = launch(&argv(&["/bin/sh", "-c", script]), &env).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_launch_inheriting_keeps_ambient_env() {
        let script = r#"[ -n "$PATH" ] && [ "$EXTRA" = 1 ]"#;
        let code = launch_inheriting(&argv(&["/bin/sh", "-c", script]), &argv(&["EXTRA=1"])).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_launch_missing_executable() {
        let result = launch(&argv(&["/nonexistent/ctx-test-binary"]), &[]);
        assert!(matches!(result, Err(LaunchError::ExecNotFound(p)) if p == "/nonexistent/ctx-test-binary"));
    }

    #[test]
    fn test_launch_empty_argv() {
        assert!(matches!(launch(&[], &[]), Err(LaunchError::EmptyCommand)));
    }

    #[test]
    fn test_capture_output_trims_and_sees_extra_env() {
        let out = capture_output(
            &argv(&["/bin/sh", "-c", "printf '  %s\\n\\n' \"$GREETING\""]),
            &argv(&["GREETING=hello"]),
        )
        .unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn test_capture_output_inherits_ambient_env() {
        let out = capture_output(&argv(&["/bin/sh", "-c", "echo \"$PATH\""]), &[]).unwrap();
        assert_eq!(out, std::env::var("PATH").unwrap_or_default().trim());
    }

    #[test]
    fn test_capture_output_non_zero_exit() {
        let result = capture_output(&argv(&["/bin/sh", "-c", "exit 2"]), &[]);
        assert!(matches!(result, Err(LaunchError::NonZeroExitStatus(_, 2))));
    }

    #[test]
    fn test_split_env_entry() {
        assert_eq!(split_env_entry("A=b=c"), Some(("A", "b=c")));
        assert_eq!(split_env_entry("EMPTY="), Some(("EMPTY", "")));
        assert_eq!(split_env_entry("novalue"), None);
        assert_eq!(split_env_entry("=x"), None);
    }
}
