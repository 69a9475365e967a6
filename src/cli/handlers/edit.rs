// EN: src/cli/handlers/edit.rs

//! `ctx edit`.

use anyhow::{Result, anyhow};
use std::env;

use crate::{
    cli::Invocation, constants::EDITOR_VAR, core::shell_words, system::executor,
};

/// Opens the configuration file in `$EDITOR`. The file does not need to exist.
pub fn handle(_args: Vec<String>, invocation: &Invocation) -> Result<i32> {
    let editor = env::var(EDITOR_VAR)
        .ok()
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| anyhow!(t!("edit.error.no_editor")))?;
    let path = invocation.config_path()?;

    // `EDITOR` may carry arguments, e.g. "code --wait".
    let mut editor_command = shell_words::split_with_envs(&editor)?;
    if editor_command.argv.is_empty() {
        return Err(anyhow!(t!("edit.error.no_editor")));
    }
    editor_command.argv.push(path.display().to_string());

    Ok(executor::launch_inheriting(
        &editor_command.argv,
        &editor_command.envs,
    )?)
}
