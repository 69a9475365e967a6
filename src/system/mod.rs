//! # System Interaction Layer
//!
//! Everything that talks to other processes lives here.
//!
//! ## Modules
//!
//! - **`executor`**: spawns processes, either fully attached to the terminal
//!   with an explicit environment (`launch`) or with stdout captured
//!   (`capture_output`).
//! - **`picker`**: interactive context selection through `fzf`, with a
//!   built-in fallback when it is not installed.
//! - **`shell`**: decides which shell an interactive session runs.

pub mod executor;
pub mod picker;
pub mod shell;
