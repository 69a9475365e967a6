// EN: src/cli/handlers/list.rs

//! `ctx list`.

// The output is one name per line with no decoration: the picker reads it.
// Like `prompt`, failures degrade to empty output.

use anyhow::Result;
use std::io::{self, Write};

use super::commons;
use crate::cli::Invocation;

/// Prints the names of the current candidates, one per line.
pub fn handle(_args: Vec<String>, invocation: &Invocation) -> Result<i32> {
    match candidate_names(invocation) {
        Ok(names) => {
            let mut stdout = io::stdout().lock();
            for name in names {
                // The reader may go away early (e.g. the picker was closed).
                if writeln!(stdout, "{}", name).is_err() {
                    break;
                }
            }
        }
        Err(e) => log::debug!("List suppressed: {:#}", e),
    }
    Ok(0)
}

fn candidate_names(invocation: &Invocation) -> Result<Vec<String>> {
    let (_, config) = commons::load_config(invocation)?;
    let scope = commons::resolve_scope(&config, invocation)?;
    Ok(scope
        .candidates(&config)
        .iter()
        .map(|c| c.name.clone())
        .collect())
}
