// src/system/picker.rs

//! Interactive context selection.

use crate::{
    constants::{CONFIG_PATH_VAR, PICKER_ARGS, PICKER_COMMAND, PICKER_SOURCE_VAR},
    models::Context,
    system::executor::{self, LaunchError},
};
use dialoguer::{Error as DialoguerError, Select, theme::ColorfulTheme};
use std::path::Path;
use thiserror::Error;

/// Failures of the interactive picker.
#[derive(Error, Debug)]
pub enum PickerError {
    /// `fzf` could not be run.
    #[error("Picker failed: {0}")]
    Launch(#[from] LaunchError),
    /// The in-terminal list failed.
    #[error("User Interface Error: {0}")]
    Prompt(#[from] DialoguerError),
    /// Nothing was chosen.
    #[error("No context selected.")]
    Cancelled,
}

/// Lets the user choose one of `candidates` interactively.
///
/// `fzf` is preferred. It lists its candidates by running `<program> list`,
/// and `CTX_CONFIG` is pinned so that sub-invocation reads the same file. If
/// `fzf` is not installed, an in-terminal selection list is shown instead.
pub fn pick_context(
    program: &str,
    config_path: &Path,
    candidates: &[Context],
) -> Result<String, PickerError> {
    let argv: Vec<String> = std::iter::once(PICKER_COMMAND)
        .chain(PICKER_ARGS.iter().copied())
        .map(str::to_string)
        .collect();
    let picker_env = vec![
        format!("{}={}", PICKER_SOURCE_VAR, list_command(program)),
        format!("{}={}", CONFIG_PATH_VAR, config_path.display()),
    ];

    match executor::capture_output(&argv, &picker_env) {
        Ok(selection) if selection.is_empty() => Err(PickerError::Cancelled),
        Ok(selection) => Ok(selection),
        Err(LaunchError::ExecNotFound(_)) => {
            log::debug!("'{}' not found, falling back to the built-in picker", PICKER_COMMAND);
            select_in_terminal(candidates)
        }
        // fzf exits non-zero on escape or when nothing matched.
        Err(LaunchError::NonZeroExitStatus(_, code)) => {
            log::debug!("Picker exited with code {}", code);
            Err(PickerError::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}

/// The shell command the picker runs to obtain its candidates.
fn list_command(program: &str) -> String {
    let quoted = shlex::try_quote(program)
        .map(|q| q.into_owned())
        .unwrap_or_else(|_| program.to_string());
    format!("{} list", quoted)
}

fn select_in_terminal(candidates: &[Context]) -> Result<String, PickerError> {
    let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("picker.prompt"))
        .items(&names)
        .default(0)
        .interact_opt()?
        .ok_or(PickerError::Cancelled)?;

    names
        .get(selection)
        .map(|name| name.to_string())
        .ok_or(PickerError::Cancelled)
}
