use std::collections::HashMap;

pub mod nutrition;
pub mod profile;
pub mod system;

use crate::cli::context::CliContext;
use crate::errors::CliError;

pub type CommandResult = Result<(), CliError>;

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(profile::definitions());
    commands.extend(nutrition::definitions());
    commands
}

pub type CommandHandler = fn(&mut CliContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

/// Pulls `--flag value` out of `args`, returning the value and the rest.
/// A flag with nothing after it is a usage error.
pub(crate) fn take_option<'a>(
    args: &[&'a str],
    flag: &str,
    usage: &str,
) -> Result<(Option<&'a str>, Vec<&'a str>), CliError> {
    let mut value = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if *arg == flag {
            let Some(next) = iter.next() else {
                return Err(CliError::Input(format!(
                    "`{flag}` needs a value; usage: {usage}"
                )));
            };
            value = Some(*next);
        } else {
            rest.push(*arg);
        }
    }
    Ok((value, rest))
}

pub(crate) fn usage_error(definition_usage: &str) -> CliError {
    CliError::Input(format!("usage: {definition_usage}"))
}
