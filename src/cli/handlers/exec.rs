// EN: src/cli/handlers/exec.rs

//! `ctx exec`.

use anyhow::{Result, anyhow};
use clap::Parser;

use super::commons;
use crate::{cli::Invocation, core::context_resolver, system::executor};

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
struct ExecArgs {
    /// The context to run the command in.
    context: String,

    /// The command and its arguments, optionally after `--`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

/// Runs a single command inside a candidate context.
pub fn handle(args: Vec<String>, invocation: &Invocation) -> Result<i32> {
    let Some(exec_args) = commons::parse_args::<ExecArgs>(&args)? else {
        return Ok(0);
    };
    if exec_args.command.is_empty() {
        return Err(anyhow!(t!("exec.error.no_command")));
    }

    let (_, config) = commons::load_config(invocation)?;
    let scope = commons::resolve_scope(&config, invocation)?;
    let target = context_resolver::find_candidate(scope.candidates(&config), &exec_args.context)?;

    // No shell wrapping: the command runs as given.
    let environment = commons::assemble_environment(target, &[], invocation)?;
    Ok(executor::launch(&exec_args.command, &environment)?)
}
