//! Locating contexts: the `CTX_ACTIVE` marker and the tree walk behind it.

use crate::constants::ACTIVE_PATH_SEPARATOR;
use crate::models::{Config, Context};
use std::fmt;
use thiserror::Error;

/// Failures while locating a context in the tree.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LookupError {
    /// No candidate carries the requested name.
    #[error("context {0} not found")]
    NotFound(String),
    /// `CTX_ACTIVE` names a context the configuration does not have.
    #[error(
        "Active context path '{path}' does not match the configuration: no context named '{segment}' at that level."
    )]
    ActivePathMismatch {
        /// The full marker value.
        path: String,
        /// The first segment that did not resolve.
        segment: String,
    },
}

type LookupResult<T> = Result<T, LookupError>;

/// The chain of context names from the root to the active context, as carried
/// in `CTX_ACTIVE` across process boundaries.
///
/// The encoding is comma-joined and append-only: activating `c` from `a,b`
/// yields `a,b,c`. Shells that are already running depend on that format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivePath {
    segments: Vec<String>,
}

impl ActivePath {
    /// Parses the marker value. An empty value means no active context.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() {
            return Self::default();
        }
        Self {
            segments: value
                .split(ACTIVE_PATH_SEPARATOR)
                .map(str::to_string)
                .collect(),
        }
    }

    /// Reads the marker from an optional environment value.
    pub fn from_env_value(value: Option<&str>) -> Self {
        value.map(Self::parse).unwrap_or_default()
    }

    /// True when no context is active.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Context names from the root down.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The path one level below this one.
    pub fn descend(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }
}

impl fmt::Display for ActivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(ACTIVE_PATH_SEPARATOR))
    }
}

/// Where this invocation stands in the context tree.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    /// No active context; the top-level contexts are selectable.
    Idle,
    /// Inside `context`; its sub-contexts are selectable.
    Active(&'a Context),
}

impl<'a> Scope<'a> {
    /// Resolves the active path against the configuration.
    pub fn resolve(config: &'a Config, active: &ActivePath) -> LookupResult<Self> {
        Ok(match lookup(config, active)? {
            Some(context) => Scope::Active(context),
            None => Scope::Idle,
        })
    }

    /// The contexts that `set`, `exec` and `list` operate on.
    pub fn candidates(&self, config: &'a Config) -> &'a [Context] {
        match *self {
            Scope::Idle => &config.contexts,
            Scope::Active(context) => &context.children,
        }
    }

    /// The active context, if any.
    pub fn active_context(&self) -> Option<&'a Context> {
        match *self {
            Scope::Idle => None,
            Scope::Active(context) => Some(context),
        }
    }
}

/// Walks the tree along `active`, returning the deepest context.
///
/// An empty path returns `Ok(None)`. A segment that matches no child at its
/// level means the path was recorded against a different configuration.
pub fn lookup<'a>(config: &'a Config, active: &ActivePath) -> LookupResult<Option<&'a Context>> {
    let mut level: &'a [Context] = &config.contexts;
    let mut found = None;

    for segment in active.segments() {
        let context = find_by_name(level, segment).ok_or_else(|| {
            LookupError::ActivePathMismatch {
                path: active.to_string(),
                segment: segment.clone(),
            }
        })?;
        log::trace!("Active path segment '{}' resolved", segment);
        level = &context.children;
        found = Some(context);
    }

    Ok(found)
}

/// Finds a candidate by exact, case-sensitive name. The first match wins.
pub fn find_candidate<'a>(candidates: &'a [Context], id: &str) -> LookupResult<&'a Context> {
    find_by_name(candidates, id).ok_or_else(|| LookupError::NotFound(id.to_string()))
}

fn find_by_name<'a>(contexts: &'a [Context], name: &str) -> Option<&'a Context> {
    contexts.iter().find(|c| c.name == name)
}
