// src/core/environment.rs

//! Builds the environment handed to a process started inside a context.

use crate::{
    constants::ACTIVE_PATH_VAR,
    core::{
        context_resolver::ActivePath,
        env_resolver::{self, ResolutionError},
    },
    models::Context,
};
use std::env;

/// Assembles the environment for `target` on top of this process's own.
///
/// See [`assemble_with_base`] for the ordering rules.
pub fn assemble(
    target: &Context,
    extra_vars: &[String],
    active: &ActivePath,
) -> Result<Vec<String>, ResolutionError> {
    let base = env::vars_os().filter_map(|(key, value)| {
        match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (Ok(key), Err(_)) => {
                log::warn!("Skipping non UTF-8 value of inherited variable '{}'", key);
                None
            }
            _ => None,
        }
    });
    assemble_with_base(base, target, extra_vars, active)
}

/// Assembles an ordered `NAME=value` list: `base` first, then every variable
/// of `target` in declaration order, then `extra_vars`, then the new active
/// path marker. Later entries override earlier ones when the list is applied.
///
/// Resolution is all-or-nothing: the first variable that fails aborts the
/// whole assembly.
pub fn assemble_with_base<I>(
    base: I,
    target: &Context,
    extra_vars: &[String],
    active: &ActivePath,
) -> Result<Vec<String>, ResolutionError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut entries: Vec<String> = base
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();

    for definition in &target.envs {
        let value = env_resolver::resolve(definition)?;
        entries.push(format!("{}={}", definition.name, value));
    }

    entries.extend(extra_vars.iter().cloned());

    let next = active.descend(&target.name);
    log::debug!("New active path: '{}'", next);
    entries.push(format!("{}={}", ACTIVE_PATH_VAR, next));

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnvDefinition, ResolutionKind};

    fn static_env(name: &str, source: &str) -> EnvDefinition {
        EnvDefinition {
            name: name.to_string(),
            kind: ResolutionKind::Static,
            source: source.to_string(),
        }
    }

    fn context(name: &str, envs: Vec<EnvDefinition>) -> Context {
        Context {
            name: name.to_string(),
            envs,
            ..Context::default()
        }
    }

    fn base() -> Vec<(String, String)> {
        vec![
            ("HOME".to_string(), "/home/me".to_string()),
            ("TOKEN".to_string(), "ambient".to_string()),
        ]
    }

    #[test]
    fn test_static_vars_follow_inherited_in_order() {
        let target = context("dev", vec![static_env("TOKEN", "abc"), static_env("HOST", "db")]);
        let env = assemble_with_base(base(), &target, &[], &ActivePath::default()).unwrap();

        assert_eq!(
            env,
            vec![
                "HOME=/home/me",
                "TOKEN=ambient",
                "TOKEN=abc",
                "HOST=db",
                "CTX_ACTIVE=dev",
            ]
        );
    }

    #[test]
    fn test_extra_vars_come_before_marker() {
        let target = context("db", vec![static_env("A", "1")]);
        let extra = vec!["SHELL_OPT=x".to_string()];
        let env = assemble_with_base(Vec::new(), &target, &extra, &ActivePath::parse("dev")).unwrap();

        assert_eq!(env, vec!["A=1", "SHELL_OPT=x", "CTX_ACTIVE=dev,db"]);
    }

    #[test]
    fn test_marker_extends_nested_path() {
        let target = context("c", Vec::new());
        let env = assemble_with_base(Vec::new(), &target, &[], &ActivePath::parse("a,b")).unwrap();
        assert_eq!(env.last().map(String::as_str), Some("CTX_ACTIVE=a,b,c"));
    }

    #[test]
    fn test_first_failure_aborts_assembly() {
        let target = context(
            "dev",
            vec![
                static_env("OK", "1"),
                EnvDefinition {
                    name: "BROKEN".to_string(),
                    kind: ResolutionKind::File,
                    source: "/nonexistent/ctx/file".to_string(),
                },
            ],
        );
        let result = assemble_with_base(base(), &target, &[], &ActivePath::default());
        assert!(matches!(result, Err(ResolutionError::Io { name, .. }) if name == "BROKEN"));
    }

    #[test]
    fn test_assemble_inherits_process_environment() {
        let target = context("dev", Vec::new());
        let env = assemble(&target, &[], &ActivePath::default()).unwrap();
        if let Ok(path) = std::env::var("PATH") {
            assert!(env.contains(&format!("PATH={}", path)));
        }
        assert_eq!(env.last().map(String::as_str), Some("CTX_ACTIVE=dev"));
    }
}
