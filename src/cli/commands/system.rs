use crate::cli::commands::{CommandDefinition, CommandResult};
use crate::cli::context::CliContext;
use crate::cli::{help, output};
use crate::storage::PROFILE_SCHEMA_VERSION;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
    ]
}

fn cmd_version(_context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Vitality {}", meta.version));
    output::line(format!("  Profile schema: v{}", PROFILE_SCHEMA_VERSION));
    output::line(format!(
        "  Build hash    : {} ({})",
        meta.git_hash, meta.git_status
    ));
    output::line(format!("  Built at      : {}", meta.timestamp));
    output::line(format!("  Target        : {}", meta.target));
    output::line(format!("  Profile       : {}", meta.profile));
    output::line(format!("  Rustc         : {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut CliContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        match context.command(&name) {
            Some(command) => help::print_command(command),
            None => context.suggest_command(args[0]),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    output::detail(build_info::current().summary_line());
    Ok(())
}
