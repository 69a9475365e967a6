//! Command-line surface: argument parsing and per-invocation state.

use crate::{
    constants::{ACTIVE_PATH_VAR, CONFIG_PATH_VAR},
    core::{
        context_resolver::ActivePath,
        paths::{self, PathError},
    },
};
use clap::{CommandFactory, Parser};
use std::{env, path::PathBuf};

pub mod dispatcher;
pub mod handlers;

/// Builds the dynamic, color-aware full help string at runtime.
fn build_help_string() -> &'static str {
    let use_colors = colored::control::SHOULD_COLORIZE.should_colorize();

    let template = t!("cli.help.template");

    let title = if use_colors { "\x1b[1;33m" } else { "" }; // Bold Yellow
    let hl = if use_colors { "\x1b[1;36m" } else { "" }; // Bold Cyan
    let hi = if use_colors { "\x1b[1m" } else { "" }; // Bold
    let cmd = if use_colors { "\x1b[36m" } else { "" }; // Cyan
    let group = if use_colors { "\x1b[1;32m" } else { "" }; // Bold Green
    let dim = if use_colors { "\x1b[2m" } else { "" };
    let reset = if use_colors { "\x1b[0m" } else { "" };

    let formatted_string = template
        .replace("<title>", title)
        .replace("</title>", reset)
        .replace("<hl>", hl)
        .replace("</hl>", reset)
        .replace("<hi>", hi)
        .replace("</hi>", reset)
        .replace("<cmd>", cmd)
        .replace("</cmd>", reset)
        .replace("<group>", group)
        .replace("</group>", reset)
        .replace("<dim>", dim)
        .replace("</dim>", reset);

    Box::leak(formatted_string.into_boxed_str())
}

/// ctx: switch between nested shell contexts.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    help_template = { build_help_string() },
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
// `help` is a regular command word, routed by the dispatcher.
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Path to the configuration file (env: `CTX_CONFIG`, default `~/.ctx.hcl`).
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// The command word followed by its arguments, passed through verbatim.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Prints the full help text.
pub fn print_help() -> std::io::Result<()> {
    Cli::command().print_help()
}

/// Rewrites single-dash long flags (`-config`, `-help`) into the double-dash
/// form clap understands. Only the flag section in front of the command word
/// is touched; everything from the first positional or `--` on is left as is.
pub fn normalize_flags(raw: Vec<String>) -> Vec<String> {
    let mut normalized = Vec::with_capacity(raw.len());
    let mut iter = raw.into_iter();

    // The binary name.
    normalized.extend(iter.next());

    while let Some(arg) = iter.next() {
        let rewritten = match arg.as_str() {
            "--" => {
                normalized.push(arg);
                break;
            }
            "-config" | "--config" => {
                normalized.push("--config".to_string());
                normalized.extend(iter.next());
                continue;
            }
            "-help" => "--help".to_string(),
            _ if arg.starts_with("-config=") => format!("-{}", arg),
            _ if !arg.starts_with('-') => {
                normalized.push(arg);
                break;
            }
            _ => arg,
        };
        normalized.push(rewritten);
    }

    normalized.extend(iter);
    normalized
}

/// Everything a handler needs to know about the current invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    config_flag: Option<String>,
    config_env: Option<String>,
    /// The active path read from `CTX_ACTIVE` at start-up.
    pub active_path: ActivePath,
    /// How to run this binary again (used by the picker to list candidates).
    pub program: String,
}

impl Invocation {
    /// Captures the relevant parts of the process environment.
    pub fn from_env(cli: &Cli) -> Self {
        let program = env::current_exe()
            .map(|p| p.display().to_string())
            .or_else(|_| env::args().next().ok_or(()))
            .unwrap_or_else(|_| env!("CARGO_PKG_NAME").to_string());

        Self {
            config_flag: cli.config.clone(),
            config_env: env::var(CONFIG_PATH_VAR).ok(),
            active_path: ActivePath::from_env_value(env::var(ACTIVE_PATH_VAR).ok().as_deref()),
            program,
        }
    }

    /// The configuration file this invocation works with.
    pub fn config_path(&self) -> Result<PathBuf, PathError> {
        paths::resolve_config_path(self.config_flag.as_deref(), self.config_env.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_single_dash_flags() {
        let normalized = normalize_flags(args(&["ctx", "-config", "/tmp/c.hcl", "list"]));
        assert_eq!(normalized, args(&["ctx", "--config", "/tmp/c.hcl", "list"]));

        let normalized = normalize_flags(args(&["ctx", "-config=/tmp/c.hcl", "-help"]));
        assert_eq!(normalized, args(&["ctx", "--config=/tmp/c.hcl", "--help"]));
    }

    #[test]
    fn test_normalize_stops_at_command_word() {
        let normalized = normalize_flags(args(&["ctx", "exec", "dev", "--", "ls", "-help"]));
        assert_eq!(normalized, args(&["ctx", "exec", "dev", "--", "ls", "-help"]));
    }

    #[test]
    fn test_normalize_stops_at_double_dash() {
        let normalized = normalize_flags(args(&["ctx", "--", "-config"]));
        assert_eq!(normalized, args(&["ctx", "--", "-config"]));
    }

    #[test]
    fn test_cli_parses_config_and_command() {
        let cli = Cli::parse_from(normalize_flags(args(&[
            "ctx", "-config", "/tmp/c.hcl", "exec", "dev", "--", "ls", "-la",
        ])));
        assert_eq!(cli.config.as_deref(), Some("/tmp/c.hcl"));
        assert_eq!(cli.args.first().map(String::as_str), Some("exec"));
        assert_eq!(cli.args.last().map(String::as_str), Some("-la"));
    }

    #[test]
    fn test_cli_without_command() {
        let cli = Cli::parse_from(args(&["ctx"]));
        assert!(cli.config.is_none());
        assert!(cli.args.is_empty());
    }

    #[test]
    fn test_help_template_renders() {
        Cli::command().debug_assert();
    }
}
