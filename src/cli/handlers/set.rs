// EN: src/cli/handlers/set.rs

//! `ctx set`.

use anyhow::{Result, anyhow};
use clap::Parser;
use colored::Colorize;
use std::env;

use super::commons;
use crate::{
    cli::Invocation,
    constants::{AMBIENT_SHELL_VAR, SHELL_OVERRIDE_VAR},
    core::context_resolver,
    system::{executor, picker, shell},
};

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
struct SetArgs {
    /// The context to enter. If omitted, it is picked interactively.
    context: Option<String>,
}

/// Enters a candidate context in a new interactive shell.
pub fn handle(args: Vec<String>, invocation: &Invocation) -> Result<i32> {
    // 1. Parse args.
    let Some(set_args) = commons::parse_args::<SetArgs>(&args)? else {
        return Ok(0);
    };

    // 2. Load the config and find out where we are.
    let (config_path, config) = commons::load_config(invocation)?;
    let scope = commons::resolve_scope(&config, invocation)?;
    let candidates = scope.candidates(&config);

    // 3. Determine the context, asking the user if none was given.
    let context_id = match set_args.context.filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => {
            if candidates.is_empty() {
                return Err(anyhow!(t!("set.error.no_candidates")));
            }
            picker::pick_context(&invocation.program, &config_path, candidates)?
        }
    };
    let target = context_resolver::find_candidate(candidates, &context_id)?;

    // 4. Decide on the shell before any variable is resolved.
    let shell_command = shell::resolve_shell_command(
        env::var(SHELL_OVERRIDE_VAR).ok(),
        config.shell.as_deref(),
        env::var(AMBIENT_SHELL_VAR).ok(),
    )?;

    // 5. Build the environment and hand over to the shell.
    let environment =
        commons::assemble_environment(target, &shell_command.envs, invocation)?;

    eprintln!(
        "{}",
        format!(
            t!("set.info.entering"),
            path = invocation.active_path.descend(&target.name)
        )
        .dimmed()
    );

    Ok(executor::launch(&shell_command.argv, &environment)?)
}
