// src/core/mod.rs

//! Context model resolution: loading the configuration, locating the active
//! context, resolving variables and assembling environments.

pub mod config_loader;
pub mod context_resolver;
pub mod env_resolver;
pub mod environment;
pub mod paths;
pub mod shell_words;
