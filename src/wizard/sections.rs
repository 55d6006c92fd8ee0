//! Render functions bound to the sections of each flow.

use crate::domain::biomarker::BiomarkerTier;
use crate::domain::profile::{ProfileData, ProfileField, ProfileUpdate, RecommendationSettings};

use super::dispatch::RenderContext;
use super::progress::AccuracyTable;

pub const CONDITION_OPTIONS: &[&str] = &[
    "hypertension",
    "type_2_diabetes",
    "high_cholesterol",
    "asthma",
    "thyroid_disorder",
    "heart_disease",
    "arthritis",
    "depression_anxiety",
];

pub const GOAL_OPTIONS: &[&str] = &[
    "weight_loss",
    "muscle_gain",
    "energy_boost",
    "better_sleep",
    "stress_reduction",
    "heart_health",
    "longevity",
    "mental_clarity",
];

pub const FOCUS_OPTIONS: &[&str] = &["nutrition", "exercise", "sleep", "stress", "supplements"];

fn parse_measure(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().replace(',', ".").parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

fn parse_age(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|age| (1..=120).contains(age))
}

fn parse_stress(raw: &str) -> Option<u8> {
    raw.trim().parse::<u8>().ok().filter(|level| (1..=10).contains(level))
}

fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

fn age_and_gender(ctx: &mut RenderContext<'_>) {
    let age = ctx.data().age;
    ctx.field(
        ProfileField::Age.label(),
        age,
        Some("Years, between 1 and 120."),
        parse_age,
        ProfileUpdate::Age,
    );
    let gender = ctx.data().gender;
    ctx.choice(ProfileField::Gender.label(), gender, ProfileUpdate::Gender);
}

fn height_and_weight(ctx: &mut RenderContext<'_>) {
    let height = ctx.data().height_cm;
    ctx.field(
        ProfileField::HeightCm.label(),
        height,
        None,
        parse_measure,
        ProfileUpdate::HeightCm,
    );
    let weight = ctx.data().weight_kg;
    ctx.field(
        ProfileField::WeightKg.label(),
        weight,
        None,
        parse_measure,
        ProfileUpdate::WeightKg,
    );
}

fn activity_and_diet(ctx: &mut RenderContext<'_>) {
    let level = ctx.data().activity_level;
    ctx.choice(
        ProfileField::ActivityLevel.label(),
        level,
        ProfileUpdate::ActivityLevel,
    );
    let diet = ctx.data().diet_type;
    ctx.choice(ProfileField::DietType.label(), diet, ProfileUpdate::DietType);
    let water = ctx.data().water_liters;
    ctx.field(
        ProfileField::WaterLiters.label(),
        water,
        None,
        parse_measure,
        ProfileUpdate::WaterLiters,
    );
}

fn sleep_and_habits(ctx: &mut RenderContext<'_>) {
    let sleep = ctx.data().sleep_hours;
    ctx.field(
        ProfileField::SleepHours.label(),
        sleep,
        Some("Average hours per night."),
        parse_measure,
        ProfileUpdate::SleepHours,
    );
    let stress = ctx.data().stress_level;
    ctx.field(
        ProfileField::StressLevel.label(),
        stress,
        Some("1 is very relaxed, 10 is constantly stressed."),
        parse_stress,
        ProfileUpdate::StressLevel,
    );
    let smoker = ctx.data().smoker;
    ctx.yes_no(ProfileField::Smoker.label(), smoker, ProfileUpdate::Smoker);
    let alcohol = ctx.data().alcohol_units_per_week;
    ctx.field(
        ProfileField::AlcoholUnitsPerWeek.label(),
        alcohol,
        None,
        parse_count,
        ProfileUpdate::AlcoholUnitsPerWeek,
    );
}

fn conditions(ctx: &mut RenderContext<'_>) {
    ctx.checklist(
        ProfileField::ChronicConditions.label(),
        CONDITION_OPTIONS,
        |data| &data.chronic_conditions,
        ProfileUpdate::ChronicConditions,
    );
}

fn medications_and_allergies(ctx: &mut RenderContext<'_>) {
    ctx.free_list(
        ProfileField::Medications.label(),
        |data| &data.medications,
        ProfileUpdate::Medications,
    );
    ctx.free_list(
        ProfileField::Allergies.label(),
        |data| &data.allergies,
        ProfileUpdate::Allergies,
    );
}

fn goals_and_preferences(ctx: &mut RenderContext<'_>) {
    ctx.checklist(
        ProfileField::HealthGoals.label(),
        GOAL_OPTIONS,
        |data| &data.health_goals,
        ProfileUpdate::HealthGoals,
    );
    // The nested settings record is replaced as a whole, so each update
    // carries the untouched siblings along.
    let settings = ctx.data().recommendation_settings.clone();
    ctx.checklist(
        "Recommendation focus",
        FOCUS_OPTIONS,
        |data| &data.recommendation_settings.focus_areas,
        |focus_areas| {
            ProfileUpdate::RecommendationSettings(RecommendationSettings {
                focus_areas,
                ..settings.clone()
            })
        },
    );
    let settings = ctx.data().recommendation_settings.clone();
    ctx.choice(
        "Recommendation detail",
        Some(settings.detail_level),
        |detail| {
            ProfileUpdate::RecommendationSettings(RecommendationSettings {
                detail_level: detail.unwrap_or_default(),
                ..settings.clone()
            })
        },
    );
}

/// Lines describing every profile field, shared by the summary sections
/// and the `show` command.
pub fn summary_lines(data: &ProfileData) -> Vec<String> {
    let mut lines: Vec<String> = ProfileField::ALL
        .iter()
        .map(|field| {
            let value = field
                .display_value(data)
                .unwrap_or_else(|| "[not set]".to_string());
            format!("{}: {}", field.label(), value)
        })
        .collect();
    if let Some(bmi) = data.bmi() {
        lines.push(format!("BMI: {bmi:.1}"));
    }
    lines.push(format!(
        "{} of {} fields filled",
        data.filled_fields(),
        ProfileField::ALL.len()
    ));
    lines
}

fn summary(ctx: &mut RenderContext<'_>) {
    let lines = summary_lines(ctx.data());
    ctx.show("Profile summary", &lines);
}

// Step-by-step layout.

pub fn render_basics(ctx: &mut RenderContext<'_>) {
    age_and_gender(ctx);
}

pub fn render_body(ctx: &mut RenderContext<'_>) {
    height_and_weight(ctx);
    if let Some(bmi) = ctx.data().bmi() {
        ctx.show("BMI", &[format!("{bmi:.1}")]);
    }
}

pub fn render_activity(ctx: &mut RenderContext<'_>) {
    activity_and_diet(ctx);
}

pub fn render_sleep_stress(ctx: &mut RenderContext<'_>) {
    sleep_and_habits(ctx);
}

pub fn render_medical_history(ctx: &mut RenderContext<'_>) {
    conditions(ctx);
}

pub fn render_medications(ctx: &mut RenderContext<'_>) {
    medications_and_allergies(ctx);
}

pub fn render_goals(ctx: &mut RenderContext<'_>) {
    goals_and_preferences(ctx);
}

pub fn render_summary(ctx: &mut RenderContext<'_>) {
    summary(ctx);
}

// Mobile layout: same fields, fewer screens.

pub fn render_about_you(ctx: &mut RenderContext<'_>) {
    age_and_gender(ctx);
    height_and_weight(ctx);
}

pub fn render_lifestyle(ctx: &mut RenderContext<'_>) {
    activity_and_diet(ctx);
    sleep_and_habits(ctx);
}

pub fn render_health(ctx: &mut RenderContext<'_>) {
    conditions(ctx);
    medications_and_allergies(ctx);
}

pub fn render_mobile_goals(ctx: &mut RenderContext<'_>) {
    goals_and_preferences(ctx);
}

pub fn render_review(ctx: &mut RenderContext<'_>) {
    summary(ctx);
}

// Biological-age wizard.

fn markers(ctx: &mut RenderContext<'_>, tier: BiomarkerTier) {
    if tier == BiomarkerTier::Basic {
        let age = ctx.data().age;
        ctx.field(
            "Chronological age",
            age,
            Some("Used as the baseline for the estimate."),
            parse_age,
            ProfileUpdate::Age,
        );
    }
    let catalog = ctx.catalog();
    for definition in catalog.in_tier(tier) {
        if ctx.interrupted() {
            break;
        }
        ctx.lab_value(definition);
    }
}

pub fn render_basic_markers(ctx: &mut RenderContext<'_>) {
    markers(ctx, BiomarkerTier::Basic);
}

pub fn render_extended_markers(ctx: &mut RenderContext<'_>) {
    markers(ctx, BiomarkerTier::Extended);
}

pub fn render_comprehensive_markers(ctx: &mut RenderContext<'_>) {
    markers(ctx, BiomarkerTier::Comprehensive);
}

pub fn render_bioage_results(ctx: &mut RenderContext<'_>) {
    let catalog = ctx.catalog();
    let filled = catalog.filled_count(&ctx.data().lab_results);
    let table = AccuracyTable::standard();
    let mut lines = vec![
        format!("{filled} of {} biomarkers entered", catalog.len()),
        table.describe(filled),
    ];
    for tier in BiomarkerTier::ALL {
        let entered: Vec<String> = catalog
            .in_tier(tier)
            .into_iter()
            .filter_map(|definition| {
                ctx.data()
                    .lab_results
                    .get(definition.id)
                    .map(|value| format!("  {} = {value} {}", definition.label, definition.unit))
            })
            .collect();
        if entered.is_empty() {
            continue;
        }
        lines.push(format!("{} markers:", tier.label()));
        lines.extend(entered);
    }
    ctx.show("Biological age", &lines);
}
