//! The concrete flows built on the navigator.
//!
//! Flows differ only in configuration: which sections they show, how
//! progress is computed, and whether the final action is gated.

use serde::{Deserialize, Serialize};

use crate::domain::biomarker::{BiomarkerCatalog, BiomarkerTier};
use crate::domain::profile::{ProfileData, ProfileField};
use crate::domain::recommendation::PromptKind;

use super::completion::FieldBucket;
use super::interaction::GenerateOption;
use super::navigator::NavigatorState;
use super::progress::{AccuracyTable, ProgressPolicy};
use super::registry::{SectionDescriptor, SectionRegistry};
use super::sections;

/// How the health-profile questionnaire is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileLayout {
    #[default]
    StepByStep,
    Mobile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    ProfileStepByStep,
    ProfileMobile,
    BiologicalAge,
}

impl From<ProfileLayout> for FlowKind {
    fn from(layout: ProfileLayout) -> Self {
        match layout {
            ProfileLayout::StepByStep => FlowKind::ProfileStepByStep,
            ProfileLayout::Mobile => FlowKind::ProfileMobile,
        }
    }
}

/// Condition the final action must meet before it is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateRequirement {
    Always,
    MinFilled { bucket: FieldBucket, min: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateGate {
    pub label: &'static str,
    pub requirement: GateRequirement,
}

impl GenerateGate {
    pub fn allows(&self, data: &ProfileData) -> bool {
        match &self.requirement {
            GateRequirement::Always => true,
            GateRequirement::MinFilled { bucket, min } => bucket.filled_count(data) >= *min,
        }
    }

    fn hint(&self, data: &ProfileData) -> Option<String> {
        match &self.requirement {
            GateRequirement::Always => None,
            GateRequirement::MinFilled { bucket, min } => {
                let filled = bucket.filled_count(data);
                (filled < *min).then(|| format!("Enter at least {min} values ({filled} so far)"))
            }
        }
    }
}

/// Accuracy indicator shown alongside the progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccuracyDisplay {
    pub bucket: FieldBucket,
    pub table: AccuracyTable,
}

#[derive(Debug, Clone)]
pub struct FlowConfig {
    pub kind: FlowKind,
    pub name: &'static str,
    pub registry: SectionRegistry,
    pub progress: ProgressPolicy,
    pub generate: Option<GenerateGate>,
    pub prompt_kind: PromptKind,
    pub accuracy: Option<AccuracyDisplay>,
}

impl FlowConfig {
    pub fn for_kind(kind: FlowKind, catalog: &BiomarkerCatalog) -> Self {
        match kind {
            FlowKind::ProfileStepByStep => Self::profile_step_by_step(),
            FlowKind::ProfileMobile => Self::profile_mobile(),
            FlowKind::BiologicalAge => Self::biological_age(catalog),
        }
    }

    /// Desktop questionnaire, one topic per step.
    pub fn profile_step_by_step() -> Self {
        use ProfileField as F;

        let registry = SectionRegistry::new(vec![
            SectionDescriptor::new("basics", "Basics", "user", sections::render_basics)
                .with_bucket(FieldBucket::Profile(vec![F::Age, F::Gender])),
            SectionDescriptor::new("body", "Body", "ruler", sections::render_body)
                .with_bucket(FieldBucket::Profile(vec![F::HeightCm, F::WeightKg])),
            SectionDescriptor::new("activity", "Activity & diet", "activity", sections::render_activity)
                .with_bucket(FieldBucket::Profile(vec![F::ActivityLevel, F::DietType, F::WaterLiters])),
            SectionDescriptor::new("sleep_stress", "Sleep & stress", "moon", sections::render_sleep_stress)
                .with_bucket(FieldBucket::Profile(vec![
                    F::SleepHours,
                    F::StressLevel,
                    F::Smoker,
                    F::AlcoholUnitsPerWeek,
                ])),
            SectionDescriptor::new("medical", "Medical history", "heart", sections::render_medical_history)
                .with_bucket(FieldBucket::Profile(vec![F::ChronicConditions])),
            SectionDescriptor::new("medications", "Medications & allergies", "pill", sections::render_medications)
                .with_bucket(FieldBucket::Profile(vec![F::Medications, F::Allergies])),
            SectionDescriptor::new("goals", "Goals", "target", sections::render_goals)
                .with_bucket(FieldBucket::Profile(vec![F::HealthGoals, F::RecommendationSettings])),
            SectionDescriptor::new("summary", "Summary", "check", sections::render_summary),
        ]);

        Self {
            kind: FlowKind::ProfileStepByStep,
            name: "Health profile",
            registry,
            progress: ProgressPolicy::StepIndex,
            generate: Some(GenerateGate {
                label: "Generate recommendations",
                requirement: GateRequirement::Always,
            }),
            prompt_kind: PromptKind::HealthProfile,
            accuracy: None,
        }
    }

    /// Compact questionnaire: the same fields over five screens.
    pub fn profile_mobile() -> Self {
        let registry = SectionRegistry::new(vec![
            SectionDescriptor::new("about_you", "About you", "user", sections::render_about_you),
            SectionDescriptor::new("lifestyle", "Lifestyle", "activity", sections::render_lifestyle),
            SectionDescriptor::new("health", "Health", "heart", sections::render_health),
            SectionDescriptor::new("goals", "Goals", "target", sections::render_mobile_goals),
            SectionDescriptor::new("review", "Review", "check", sections::render_review),
        ]);

        Self {
            kind: FlowKind::ProfileMobile,
            name: "Health profile",
            registry,
            progress: ProgressPolicy::StepIndex,
            generate: Some(GenerateGate {
                label: "Generate recommendations",
                requirement: GateRequirement::Always,
            }),
            prompt_kind: PromptKind::HealthProfile,
            accuracy: None,
        }
    }

    /// Biomarker entry in three cumulative tiers followed by a results step.
    pub fn biological_age(catalog: &BiomarkerCatalog) -> Self {
        let table = AccuracyTable::standard();
        let threshold = |tier: BiomarkerTier| table.min_count_for(tier).unwrap_or(usize::MAX);
        let bucket_for = |tier: BiomarkerTier| FieldBucket::LabResults(catalog.ids_up_to(tier));
        let all = FieldBucket::LabResults(catalog.all_ids());

        let registry = SectionRegistry::new(vec![
            SectionDescriptor::new("basic", "Basic panel", "droplet", sections::render_basic_markers)
                .with_threshold(bucket_for(BiomarkerTier::Basic), threshold(BiomarkerTier::Basic)),
            SectionDescriptor::new("extended", "Extended panel", "flask", sections::render_extended_markers)
                .with_threshold(
                    bucket_for(BiomarkerTier::Extended),
                    threshold(BiomarkerTier::Extended),
                ),
            SectionDescriptor::new(
                "comprehensive",
                "Comprehensive panel",
                "microscope",
                sections::render_comprehensive_markers,
            )
            .with_threshold(
                bucket_for(BiomarkerTier::Comprehensive),
                threshold(BiomarkerTier::Comprehensive),
            ),
            SectionDescriptor::new("results", "Results", "chart", sections::render_bioage_results),
        ]);

        let target = threshold(BiomarkerTier::Comprehensive);
        let basic_min = threshold(BiomarkerTier::Basic);
        Self {
            kind: FlowKind::BiologicalAge,
            name: "Biological age",
            registry,
            progress: ProgressPolicy::Volume {
                bucket: all.clone(),
                target,
            },
            generate: Some(GenerateGate {
                label: "Calculate biological age",
                requirement: GateRequirement::MinFilled {
                    bucket: all.clone(),
                    min: basic_min,
                },
            }),
            prompt_kind: PromptKind::BiologicalAge,
            accuracy: Some(AccuracyDisplay { bucket: all, table }),
        }
    }

    /// The final action is only offered on the last step.
    pub fn generate_option(&self, data: &ProfileData, nav: &NavigatorState) -> Option<GenerateOption> {
        if !nav.is_last() {
            return None;
        }
        self.generate.as_ref().map(|gate| GenerateOption {
            label: gate.label,
            enabled: gate.allows(data),
            hint: gate.hint(data),
        })
    }

    pub fn accuracy_line(&self, data: &ProfileData) -> Option<String> {
        self.accuracy
            .as_ref()
            .map(|display| display.table.describe(display.bucket.filled_count(data)))
    }
}
