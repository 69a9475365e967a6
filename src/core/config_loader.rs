//! # Config Loader
//!
//! Reads the HCL configuration file and walks its body into the typed models
//! of `crate::models`. The walk is strict: every attribute and block must be
//! one the format knows about, and every value must evaluate to a string
//! without any variables or functions in scope. Quoted strings and heredocs
//! both qualify.
//!
//! ```hcl
//! shell = "/bin/zsh -l"
//!
//! context "work" {
//!   prompt = "[work]"
//!   env "TOKEN" {
//!     type   = "command"
//!     source = "pass show work/token"
//!   }
//!   context "db" { ... }
//! }
//! ```
use crate::models::{Config, Context, EnvDefinition, ResolutionKind};
use hcl::{
    Block, Body, Expression, Value,
    eval::{Context as EvalContext, Evaluate},
};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Everything that can go wrong while loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file does not exist.
    #[error("Config file '{}' not found.", path.display())]
    NotFound {
        /// Path that was tried.
        path: PathBuf,
    },
    /// The file exists but could not be read.
    #[error("Could not read config file '{}': {source}", path.display())]
    Io {
        /// Path that was tried.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid HCL.
    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: hcl::Error,
    },
    /// A `context` or `env` block without exactly one label.
    #[error("Block '{block}' requires exactly one name label.")]
    MissingLabel {
        /// Block identifier, `context` or `env`.
        block: String,
    },
    /// An attribute the format does not define at that level.
    #[error("Unsupported attribute '{name}' in {scope}.")]
    UnexpectedAttribute {
        /// Where the attribute was found.
        scope: String,
        /// Attribute key.
        name: String,
    },
    /// A block the format does not define at that level.
    #[error("Unsupported block '{name}' in {scope}.")]
    UnexpectedBlock {
        /// Where the block was found.
        scope: String,
        /// Block identifier.
        name: String,
    },
    /// A value that does not evaluate to a string on its own.
    #[error("Attribute '{name}' in {scope} must be a plain string.")]
    NotAString {
        /// Where the attribute was found.
        scope: String,
        /// Attribute key.
        name: String,
    },
    /// An `env` block without `source`.
    #[error("env \"{env}\" is missing the required 'source' attribute.")]
    MissingSource {
        /// Variable name.
        env: String,
    },
}

type ConfigResult<T> = Result<T, ConfigError>;

/// Loads and parses the configuration file at `path`.
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    log::debug!("Loading config from '{}'", path.display());

    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let body = hcl::parse(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    compile_config(&body)
}

/// Builds a `Config` from an already parsed HCL body.
pub fn compile_config(body: &Body) -> ConfigResult<Config> {
    let scope = "the top level";
    let mut config = Config::default();

    for attr in body.attributes() {
        match attr.key() {
            "shell" => config.shell = Some(string_value(attr.expr(), scope, "shell")?),
            other => return Err(unexpected_attribute(scope, other)),
        }
    }

    for block in body.blocks() {
        match block.identifier() {
            "context" => config.contexts.push(compile_context(block)?),
            other => return Err(unexpected_block(scope, other)),
        }
    }

    log::debug!("Config loaded with {} top-level contexts", config.contexts.len());
    Ok(config)
}

fn compile_context(block: &Block) -> ConfigResult<Context> {
    let name = single_label(block)?;
    let scope = format!("context \"{}\"", name);
    let mut context = Context {
        name,
        ..Context::default()
    };

    for attr in block.body().attributes() {
        match attr.key() {
            "prompt" => context.prompt = Some(string_value(attr.expr(), &scope, "prompt")?),
            other => return Err(unexpected_attribute(&scope, other)),
        }
    }

    for child in block.body().blocks() {
        match child.identifier() {
            "env" => context.envs.push(compile_env(child)?),
            "context" => context.children.push(compile_context(child)?),
            other => return Err(unexpected_block(&scope, other)),
        }
    }

    Ok(context)
}

fn compile_env(block: &Block) -> ConfigResult<EnvDefinition> {
    let name = single_label(block)?;
    let scope = format!("env \"{}\"", name);
    let mut kind = ResolutionKind::default();
    let mut source = None;

    for attr in block.body().attributes() {
        match attr.key() {
            "type" => kind = ResolutionKind::from_type_name(&string_value(attr.expr(), &scope, "type")?),
            "source" => source = Some(string_value(attr.expr(), &scope, "source")?),
            other => return Err(unexpected_attribute(&scope, other)),
        }
    }

    if let Some(nested) = block.body().blocks().next() {
        return Err(unexpected_block(&scope, nested.identifier()));
    }

    let source = source.ok_or_else(|| ConfigError::MissingSource { env: name.clone() })?;
    Ok(EnvDefinition { name, kind, source })
}

fn single_label(block: &Block) -> ConfigResult<String> {
    match block.labels() {
        [label] => Ok(label.as_str().to_string()),
        _ => Err(ConfigError::MissingLabel {
            block: block.identifier().to_string(),
        }),
    }
}

fn string_value(expr: &Expression, scope: &str, name: &str) -> ConfigResult<String> {
    let not_a_string = || ConfigError::NotAString {
        scope: scope.to_string(),
        name: name.to_string(),
    };

    match expr {
        Expression::String(value) => Ok(value.clone()),
        // Heredocs and templates: only literal text is accepted.
        _ => match expr.evaluate(&EvalContext::new()) {
            Ok(Value::String(value)) => Ok(value),
            Ok(_) => Err(not_a_string()),
            Err(e) => {
                log::debug!("Could not evaluate '{}' in {}: {}", name, scope, e);
                Err(not_a_string())
            }
        },
    }
}

fn unexpected_attribute(scope: &str, name: &str) -> ConfigError {
    ConfigError::UnexpectedAttribute {
        scope: scope.to_string(),
        name: name.to_string(),
    }
}

fn unexpected_block(scope: &str, name: &str) -> ConfigError {
    ConfigError::UnexpectedBlock {
        scope: scope.to_string(),
        name: name.to_string(),
    }
}
