// src/core/paths.rs

use crate::constants::DEFAULT_CONFIG_FILENAME;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while working out the configuration path.
#[derive(Error, Debug)]
pub enum PathError {
    /// `dirs` could not find a home directory.
    #[error("Could not find the home directory.")]
    HomeDirNotFound,
    /// A `~` or `$VAR` in an explicit path could not be expanded.
    #[error("Could not expand config path '{path}': {reason}")]
    Expansion {
        /// The path as given.
        path: String,
        /// Why expansion failed.
        reason: String,
    },
}

/// Determines which configuration file to use.
///
/// Precedence: the `--config` flag, then the `CTX_CONFIG` value, then
/// `~/.ctx.hcl`. Empty values count as unset. `~` and `$VAR` references in
/// explicit paths are expanded.
pub fn resolve_config_path(
    flag: Option<&str>,
    env_override: Option<&str>,
) -> Result<PathBuf, PathError> {
    let explicit = flag
        .filter(|p| !p.is_empty())
        .or(env_override.filter(|p| !p.is_empty()));

    if let Some(template) = explicit {
        return expand_path(template);
    }

    let home = dirs::home_dir().ok_or(PathError::HomeDirNotFound)?;
    Ok(home.join(DEFAULT_CONFIG_FILENAME))
}

/// Expands `~` and environment variable references in a user-supplied path.
fn expand_path(template: &str) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(template).map_err(|e| PathError::Expansion {
        path: template.to_string(),
        reason: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}
