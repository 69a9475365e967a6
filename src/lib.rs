//! `ctx`: a hierarchical context switcher.
//!
//! Contexts are declared in an HCL file and may nest. Activating one spawns a
//! subshell (or a single command) whose environment carries the context's
//! variables plus the `CTX_ACTIVE` marker that records where in the tree the
//! new process lives.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;
