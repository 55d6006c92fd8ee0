use chrono::{Local, NaiveDate};
use tracing::info;

use crate::cli::commands::{take_option, usage_error, CommandDefinition, CommandResult};
use crate::cli::context::CliContext;
use crate::cli::output;
use crate::domain::nutrition::{goal_progress, macro_split, DiaryEntry, Macros};
use crate::errors::CliError;

const USAGE: &str = "nutrition <add|summary> <id> ...";
const ADD_USAGE: &str =
    "nutrition add <id> <food> <grams> <kcal> <protein_g> <carbs_g> <fat_g> [--date YYYY-MM-DD]";
const SUMMARY_USAGE: &str = "nutrition summary <id> [--date YYYY-MM-DD]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "nutrition",
        "Log food and review daily macro totals",
        USAGE,
        cmd_nutrition,
    )]
}

fn cmd_nutrition(context: &mut CliContext, args: &[&str]) -> CommandResult {
    match args.split_first() {
        Some((&"add", rest)) => add_entry(context, rest),
        Some((&"summary", rest)) => summary(context, rest),
        _ => Err(usage_error(USAGE)),
    }
}

fn add_entry(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let (date, rest) = take_option(args, "--date", ADD_USAGE)?;
    let date = parse_date(date)?;
    let [id, food, grams, kcal, protein, carbs, fat] = rest.as_slice() else {
        return Err(usage_error(ADD_USAGE));
    };

    let macros = Macros::new(
        parse_amount("kcal", kcal)?,
        parse_amount("protein", protein)?,
        parse_amount("carbs", carbs)?,
        parse_amount("fat", fat)?,
    );
    let grams = parse_amount("grams", grams)?;

    let mut diary = context.store.load_diary(id)?;
    diary.add(DiaryEntry::new(date, *food, grams, macros));
    context.store.save_diary(id, &diary)?;
    info!(profile = *id, %date, food = *food, "diary entry added");
    output::success(format!("Logged {grams:.0} g of {food} on {date}."));
    Ok(())
}

fn summary(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let (date, rest) = take_option(args, "--date", SUMMARY_USAGE)?;
    let date = parse_date(date)?;
    let [id] = rest.as_slice() else {
        return Err(usage_error(SUMMARY_USAGE));
    };

    let diary = context.store.load_diary(id)?;
    let entries: Vec<_> = diary.entries_on(date).collect();
    output::section(format!("Nutrition for `{}` on {}", id, date));
    if entries.is_empty() {
        output::info("No entries logged for this day.");
        return Ok(());
    }
    for entry in &entries {
        output::line(format!(
            "  {:<20} {:>6.0} g {:>7.0} kcal",
            entry.food, entry.grams, entry.kcal
        ));
    }

    let totals = diary.daily_totals(date);
    let split = macro_split(&totals);
    let goals = context.config.nutrition_goals;
    let progress = goal_progress(&totals, &goals);
    let targets = goals.gram_targets();

    output::line(format!(
        "  Total: {:.0} kcal · protein {:.1} g · carbs {:.1} g · fat {:.1} g",
        totals.kcal, totals.protein_g, totals.carbs_g, totals.fat_g
    ));
    output::line(format!(
        "  Split: protein {:.0}% · carbs {:.0}% · fat {:.0}%",
        split.protein_pct, split.carbs_pct, split.fat_pct
    ));
    output::detail(format!(
        "Energy {:.0}/{:.0} kcal ({:.0}%)",
        totals.kcal, targets.kcal, progress.kcal_pct
    ));
    output::detail(format!(
        "Protein {:.0}% · Carbs {:.0}% · Fat {:.0}% of target",
        progress.protein_pct, progress.carbs_pct, progress.fat_pct
    ));
    Ok(())
}

fn parse_date(raw: Option<&str>) -> Result<NaiveDate, CliError> {
    match raw {
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| CliError::Input(format!("invalid date `{value}`, expected YYYY-MM-DD"))),
        None => Ok(Local::now().date_naive()),
    }
}

fn parse_amount(name: &str, raw: &str) -> Result<f64, CliError> {
    match raw.replace(',', ".").parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(CliError::Input(format!(
            "{name} must be a non-negative number, got `{raw}`"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_accept_comma_decimals_and_reject_negatives() {
        assert_eq!(parse_amount("grams", "12,5").unwrap(), 12.5);
        assert!(parse_amount("grams", "-1").is_err());
        assert!(parse_amount("grams", "abc").is_err());
    }

    #[test]
    fn explicit_dates_are_parsed() {
        assert_eq!(
            parse_date(Some("2024-03-01")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert!(parse_date(Some("01/03/2024")).is_err());
    }
}
