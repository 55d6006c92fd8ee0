use tracing::info;

use crate::cli::commands::{usage_error, CommandDefinition, CommandResult};
use crate::cli::context::CliContext;
use crate::cli::interaction::TerminalInteraction;
use crate::cli::output;
use crate::config::UnitSystem;
use crate::domain::ProfileData;
use crate::errors::CliError;
use crate::recommendation::RecommendationGenerator;
use crate::storage::ProfileStore;
use crate::wizard::sections::summary_lines;
use crate::wizard::{FlowConfig, FlowKind, FormEngine, FormResult, FormSession, ProfileLayout};

const PROFILE_USAGE: &str = "profile <id> [--mobile|--step] [--view]";
const BIOAGE_USAGE: &str = "bioage <id> [--view]";
const SHOW_USAGE: &str = "show <id>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "profile",
            "Fill in or edit a health profile",
            PROFILE_USAGE,
            cmd_profile,
        ),
        CommandDefinition::new(
            "bioage",
            "Enter lab results and estimate biological age",
            BIOAGE_USAGE,
            cmd_bioage,
        ),
        CommandDefinition::new("show", "Print a stored profile", SHOW_USAGE, cmd_show),
        CommandDefinition::new("list", "List stored profiles", "list", cmd_list),
    ]
}

fn cmd_profile(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let mut layout = context.config.default_layout;
    let mut read_only = false;
    let mut id = None;
    for arg in args {
        match *arg {
            "--mobile" => layout = ProfileLayout::Mobile,
            "--step" => layout = ProfileLayout::StepByStep,
            "--view" => read_only = true,
            other if id.is_none() && !other.starts_with("--") => id = Some(other),
            _ => return Err(usage_error(PROFILE_USAGE)),
        }
    }
    let id = id.ok_or_else(|| usage_error(PROFILE_USAGE))?;
    run_flow(context, FlowKind::from(layout), id, read_only)
}

fn cmd_bioage(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let read_only = args.contains(&"--view");
    let id = args
        .iter()
        .find(|arg| !arg.starts_with("--"))
        .ok_or_else(|| usage_error(BIOAGE_USAGE))?;
    run_flow(context, FlowKind::BiologicalAge, id, read_only)
}

fn run_flow(context: &mut CliContext, kind: FlowKind, id: &str, read_only: bool) -> CommandResult {
    let flow = FlowConfig::for_kind(kind, &context.catalog);
    if read_only {
        context.store.load_required(id)?;
    }
    let session = FormSession::open(flow, context.catalog.clone(), &context.store, id)?;

    let source = context.recommendation_source();
    let mut engine = FormEngine::new()
        .with_store(&context.store, id)
        .read_only(read_only);
    if let Some(source) = source.as_ref() {
        engine = engine.with_generator(source as &dyn RecommendationGenerator);
    }

    let mut interaction = TerminalInteraction::new();
    match engine.run(session, &mut interaction) {
        FormResult::Completed(data) => {
            info!(profile = id, filled = data.filled_fields(), "flow finished");
            output::success(format!(
                "Profile `{}` complete: {} fields filled.",
                id,
                data.filled_fields()
            ));
        }
        FormResult::Cancelled => output::warning("Form cancelled. Unsaved changes were discarded."),
    }
    Ok(())
}

fn cmd_show(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let id = args.first().ok_or_else(|| usage_error(SHOW_USAGE))?;
    let data = context.store.load_required(id)?;
    output::section(format!("Profile `{}`", id));
    for line in profile_lines(&data, context.config.unit_system) {
        output::line(format!("  {line}"));
    }
    Ok(())
}

/// Summary lines with height and weight restated in the configured units.
fn profile_lines(data: &ProfileData, units: UnitSystem) -> Vec<String> {
    let mut lines = summary_lines(data);
    if units == UnitSystem::Imperial {
        if let Some(height) = data.height_cm {
            lines.push(format!("Height (imperial): {}", units.format_height(height)));
        }
        if let Some(weight) = data.weight_kg {
            lines.push(format!("Weight (imperial): {}", units.format_weight(weight)));
        }
    }
    lines
}

fn cmd_list(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let ids = context.store.list().map_err(CliError::from)?;
    if ids.is_empty() {
        output::info("No profiles stored yet. Start one with `profile <id>`.");
        return Ok(());
    }
    output::section("Profiles");
    for id in ids {
        output::line(format!("  {id}"));
    }
    Ok(())
}
