// EN: src/cli/handlers/dump.rs

//! `ctx dump`.

use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, Write},
};

use crate::cli::Invocation;

/// Prints the configuration file exactly as it is on disk.
pub fn handle(_args: Vec<String>, invocation: &Invocation) -> Result<i32> {
    let path = invocation.config_path()?;
    let content = fs::read(&path)
        .with_context(|| format!(t!("config.error.load_failed"), path = path.display()))?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&content)?;
    stdout.flush()?;
    Ok(0)
}
