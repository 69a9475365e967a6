// EN: src/bin/ctx.rs

use anyhow::Result;
use clap::{Parser, error::ErrorKind};
use colored::*;
use ctx::cli::{self, Cli, Invocation, dispatcher};
use std::env;

/// The main entry point of the `ctx` application.
/// It sets up logging, parses arguments, dispatches to the correct handler,
/// and performs centralized error handling.
fn main() {
    env_logger::init();

    let raw_args: Vec<String> = env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let cli = match Cli::try_parse_from(cli::normalize_flags(raw_args)) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        // Usage errors share the exit code of every other failure.
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    match run_cli(cli) {
        // The exit code of the spawned shell or command becomes ours.
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run_cli(cli: Cli) -> Result<i32> {
    log::debug!("CLI args parsed: {:?}", cli);

    let invocation = Invocation::from_env(&cli);
    dispatcher::dispatch(cli.args, &invocation)
}
