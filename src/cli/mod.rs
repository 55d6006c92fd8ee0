pub mod commands;
pub mod context;
pub mod help;
pub mod interaction;
pub mod output;

use tracing::debug;

use crate::errors::CliError;

pub use context::CliContext;
pub use interaction::TerminalInteraction;

/// Runs one command from process arguments (program name already stripped).
/// No arguments prints the command overview.
pub fn run_cli(args: Vec<String>) -> Result<(), CliError> {
    let mut context = CliContext::new(None)?;
    let Some((command, rest)) = args.split_first() else {
        help::print_overview(&context.registry);
        return Ok(());
    };
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
    debug!(command = command.as_str(), args = rest.len(), "dispatching command");
    context.dispatch(command, &rest)
}
