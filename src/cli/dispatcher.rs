//! Routes command words to their handlers.

use anyhow::{Result, anyhow};

use crate::cli::{Invocation, handlers, print_help};

/// Defines a command word, its aliases, and its handler.
/// Handlers return the exit code of the invocation.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>, &Invocation) -> Result<i32>,
}

/// The single source of truth for all command words.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "set",
        aliases: &[],
        handler: handlers::set::handle,
    },
    CommandDefinition {
        name: "exec",
        aliases: &[],
        handler: handlers::exec::handle,
    },
    CommandDefinition {
        name: "prompt",
        aliases: &[],
        handler: handlers::prompt::handle,
    },
    CommandDefinition {
        name: "list",
        aliases: &["ls"],
        handler: handlers::list::handle,
    },
    CommandDefinition {
        name: "dump",
        aliases: &[],
        handler: handlers::dump::handle,
    },
    CommandDefinition {
        name: "edit",
        aliases: &[],
        handler: handlers::edit::handle,
    },
    CommandDefinition {
        name: "help",
        aliases: &[],
        handler: handle_help,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Routes the positional arguments to a handler. With no command word the
/// invocation behaves like `set` without a context.
pub fn dispatch(all_args: Vec<String>, invocation: &Invocation) -> Result<i32> {
    log::debug!("Dispatching args: {:?}", all_args);

    let Some((command_word, rest)) = all_args.split_first() else {
        return handlers::set::handle(Vec::new(), invocation);
    };

    let command = find_command(command_word).ok_or_else(|| {
        anyhow!(format!(t!("cli.error.unknown_command"), name = command_word))
    })?;

    (command.handler)(rest.to_vec(), invocation)
}

fn handle_help(_args: Vec<String>, _invocation: &Invocation) -> Result<i32> {
    print_help()?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_command_by_name_and_alias() {
        assert_eq!(find_command("exec").map(|c| c.name), Some("exec"));
        assert_eq!(find_command("ls").map(|c| c.name), Some("list"));
        assert!(find_command("frobnicate").is_none());
    }

    #[test]
    fn test_registry_names_are_unique() {
        let mut names: Vec<_> = COMMAND_REGISTRY
            .iter()
            .flat_map(|c| std::iter::once(c.name).chain(c.aliases.iter().copied()))
            .collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
