// EN: src/cli/handlers/prompt.rs

//! `ctx prompt`.

// `prompt` runs on every render of the user's shell prompt, so it never
// reports errors: anything that goes wrong produces empty output.

use anyhow::Result;
use std::io::{self, Write};

use super::commons;
use crate::cli::Invocation;

/// Prints the active context's prompt, or nothing.
pub fn handle(_args: Vec<String>, invocation: &Invocation) -> Result<i32> {
    if invocation.active_path.is_empty() {
        return Ok(0);
    }

    match active_prompt(invocation) {
        Ok(Some(prompt)) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = stdout.write_all(prompt.as_bytes()).and_then(|_| stdout.flush()) {
                log::debug!("Could not write prompt: {}", e);
            }
        }
        Ok(None) => {}
        Err(e) => log::debug!("Prompt suppressed: {:#}", e),
    }

    Ok(0)
}

fn active_prompt(invocation: &Invocation) -> Result<Option<String>> {
    let (_, config) = commons::load_config(invocation)?;
    let scope = commons::resolve_scope(&config, invocation)?;
    Ok(scope.active_context().and_then(|c| c.prompt.clone()))
}
