// src/cli/handlers/commons.rs

//! Steps shared by the handlers: loading the configuration, locating the
//! active context and assembling the environment of a target context.

use anyhow::{Context as _, Result, anyhow};
use clap::{Parser, error::ErrorKind};
use std::path::PathBuf;

use crate::{
    cli::Invocation,
    core::{
        config_loader::{self, ConfigError},
        context_resolver::{LookupError, Scope},
        environment,
    },
    models::{Config, Context},
};

/// Parses the arguments of a command word.
///
/// `--help` prints the command's usage and yields `None`, which handlers turn
/// into a successful exit.
pub fn parse_args<T: Parser>(args: &[String]) -> Result<Option<T>> {
    match T::try_parse_from(args) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Loads the configuration of this invocation, returning its path as well.
pub fn load_config(invocation: &Invocation) -> Result<(PathBuf, Config)> {
    let path = invocation.config_path()?;
    log::debug!("Using config file '{}'", path.display());

    match config_loader::load_config(&path) {
        Ok(config) => Ok((path, config)),
        Err(e @ ConfigError::NotFound { .. }) => Err(anyhow!(
            "{}\n{}",
            e,
            t!("config.hint.create_first")
        )),
        Err(e) => Err(e).with_context(|| {
            format!(t!("config.error.load_failed"), path = path.display())
        }),
    }
}

/// Resolves where in the tree this invocation is.
///
/// A path that does not resolve means this shell was started against a
/// different version of the configuration.
pub fn resolve_scope<'a>(config: &'a Config, invocation: &Invocation) -> Result<Scope<'a>> {
    log::debug!("Active path: '{}'", invocation.active_path);
    Scope::resolve(config, &invocation.active_path).map_err(|e: LookupError| {
        anyhow::Error::new(e).context(format!(
            t!("lookup.error.corrupted"),
            path = invocation.active_path
        ))
    })
}

/// Assembles the environment for a process started inside `target`.
pub fn assemble_environment(
    target: &Context,
    extra_vars: &[String],
    invocation: &Invocation,
) -> Result<Vec<String>> {
    environment::assemble(target, extra_vars, &invocation.active_path)
        .with_context(|| format!(t!("set.error.activate_failed"), name = target.name))
}
