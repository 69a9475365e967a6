// EN: src/cli/handlers/mod.rs

//! One module per command word.

pub mod commons;
pub mod dump;
pub mod edit;
pub mod exec;
pub mod list;
pub mod prompt;
pub mod set;
