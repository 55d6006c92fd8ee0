//! Health profile captured by the questionnaire flows.
//!
//! The profile is one flat record that every section of a form reads from and
//! writes to. Sections never mutate it directly: they emit [`ProfileUpdate`]
//! values that are merged shallowly by [`ProfileData::apply`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::common::ChoiceOption;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl ChoiceOption for Gender {
    fn all() -> &'static [Self] {
        &[Gender::Female, Gender::Male, Gender::Other]
    }

    fn label(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Other => "Other / prefer not to say",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ChoiceOption for ActivityLevel {
    fn all() -> &'static [Self] {
        &[
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::Active,
            ActivityLevel::VeryActive,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Light => "Lightly active",
            ActivityLevel::Moderate => "Moderately active",
            ActivityLevel::Active => "Active",
            ActivityLevel::VeryActive => "Very active",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    Omnivore,
    Vegetarian,
    Vegan,
    Pescatarian,
    LowCarb,
    Other,
}

impl ChoiceOption for DietType {
    fn all() -> &'static [Self] {
        &[
            DietType::Omnivore,
            DietType::Vegetarian,
            DietType::Vegan,
            DietType::Pescatarian,
            DietType::LowCarb,
            DietType::Other,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            DietType::Omnivore => "Omnivore",
            DietType::Vegetarian => "Vegetarian",
            DietType::Vegan => "Vegan",
            DietType::Pescatarian => "Pescatarian",
            DietType::LowCarb => "Low carb",
            DietType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    Brief,
    #[default]
    Standard,
    Detailed,
}

impl ChoiceOption for DetailLevel {
    fn all() -> &'static [Self] {
        &[DetailLevel::Brief, DetailLevel::Standard, DetailLevel::Detailed]
    }

    fn label(&self) -> &'static str {
        match self {
            DetailLevel::Brief => "Brief",
            DetailLevel::Standard => "Standard",
            DetailLevel::Detailed => "Detailed",
        }
    }
}

/// Preferences forwarded to the recommendation generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendationSettings {
    pub focus_areas: Vec<String>,
    pub detail_level: DetailLevel,
    pub include_supplements: bool,
}

/// The shared, mutable record behind one form session.
///
/// No field is required. Whether a section counts as complete is derived from
/// the data on demand and never stored here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileData {
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub sleep_hours: Option<f64>,
    pub stress_level: Option<u8>,
    pub smoker: Option<bool>,
    pub alcohol_units_per_week: Option<u32>,
    pub diet_type: Option<DietType>,
    pub water_liters: Option<f64>,
    pub chronic_conditions: Vec<String>,
    pub allergies: Vec<String>,
    pub medications: Vec<String>,
    pub health_goals: Vec<String>,
    pub lab_results: BTreeMap<String, f64>,
    pub recommendation_settings: RecommendationSettings,
}

impl ProfileData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a single partial update. The carried value replaces the field
    /// wholesale; collections and nested maps are never appended to.
    pub fn apply(&mut self, update: ProfileUpdate) {
        match update {
            ProfileUpdate::Age(value) => self.age = value,
            ProfileUpdate::Gender(value) => self.gender = value,
            ProfileUpdate::HeightCm(value) => self.height_cm = value,
            ProfileUpdate::WeightKg(value) => self.weight_kg = value,
            ProfileUpdate::ActivityLevel(value) => self.activity_level = value,
            ProfileUpdate::SleepHours(value) => self.sleep_hours = value,
            ProfileUpdate::StressLevel(value) => self.stress_level = value,
            ProfileUpdate::Smoker(value) => self.smoker = value,
            ProfileUpdate::AlcoholUnitsPerWeek(value) => self.alcohol_units_per_week = value,
            ProfileUpdate::DietType(value) => self.diet_type = value,
            ProfileUpdate::WaterLiters(value) => self.water_liters = value,
            ProfileUpdate::ChronicConditions(values) => self.chronic_conditions = values,
            ProfileUpdate::Allergies(values) => self.allergies = values,
            ProfileUpdate::Medications(values) => self.medications = values,
            ProfileUpdate::HealthGoals(values) => self.health_goals = values,
            ProfileUpdate::LabResults(values) => self.lab_results = values,
            ProfileUpdate::RecommendationSettings(settings) => {
                self.recommendation_settings = settings
            }
        }
    }

    pub fn merge<I>(&mut self, updates: I)
    where
        I: IntoIterator<Item = ProfileUpdate>,
    {
        for update in updates {
            self.apply(update);
        }
    }

    /// Body-mass index, when both height and weight are known.
    pub fn bmi(&self) -> Option<f64> {
        let height_m = self.height_cm? / 100.0;
        let weight = self.weight_kg?;
        if height_m <= 0.0 {
            return None;
        }
        Some(weight / (height_m * height_m))
    }

    pub fn filled_fields(&self) -> usize {
        ProfileField::ALL
            .iter()
            .filter(|field| field.is_filled(self))
            .count()
    }
}

/// A partial update to [`ProfileData`], one variant per top-level field.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUpdate {
    Age(Option<u32>),
    Gender(Option<Gender>),
    HeightCm(Option<f64>),
    WeightKg(Option<f64>),
    ActivityLevel(Option<ActivityLevel>),
    SleepHours(Option<f64>),
    StressLevel(Option<u8>),
    Smoker(Option<bool>),
    AlcoholUnitsPerWeek(Option<u32>),
    DietType(Option<DietType>),
    WaterLiters(Option<f64>),
    ChronicConditions(Vec<String>),
    Allergies(Vec<String>),
    Medications(Vec<String>),
    HealthGoals(Vec<String>),
    LabResults(BTreeMap<String, f64>),
    RecommendationSettings(RecommendationSettings),
}

impl ProfileUpdate {
    pub fn field(&self) -> ProfileField {
        match self {
            ProfileUpdate::Age(_) => ProfileField::Age,
            ProfileUpdate::Gender(_) => ProfileField::Gender,
            ProfileUpdate::HeightCm(_) => ProfileField::HeightCm,
            ProfileUpdate::WeightKg(_) => ProfileField::WeightKg,
            ProfileUpdate::ActivityLevel(_) => ProfileField::ActivityLevel,
            ProfileUpdate::SleepHours(_) => ProfileField::SleepHours,
            ProfileUpdate::StressLevel(_) => ProfileField::StressLevel,
            ProfileUpdate::Smoker(_) => ProfileField::Smoker,
            ProfileUpdate::AlcoholUnitsPerWeek(_) => ProfileField::AlcoholUnitsPerWeek,
            ProfileUpdate::DietType(_) => ProfileField::DietType,
            ProfileUpdate::WaterLiters(_) => ProfileField::WaterLiters,
            ProfileUpdate::ChronicConditions(_) => ProfileField::ChronicConditions,
            ProfileUpdate::Allergies(_) => ProfileField::Allergies,
            ProfileUpdate::Medications(_) => ProfileField::Medications,
            ProfileUpdate::HealthGoals(_) => ProfileField::HealthGoals,
            ProfileUpdate::LabResults(_) => ProfileField::LabResults,
            ProfileUpdate::RecommendationSettings(_) => ProfileField::RecommendationSettings,
        }
    }
}

/// Names a top-level profile field, used for completion buckets and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProfileField {
    Age,
    Gender,
    HeightCm,
    WeightKg,
    ActivityLevel,
    SleepHours,
    StressLevel,
    Smoker,
    AlcoholUnitsPerWeek,
    DietType,
    WaterLiters,
    ChronicConditions,
    Allergies,
    Medications,
    HealthGoals,
    LabResults,
    RecommendationSettings,
}

impl ProfileField {
    pub const ALL: [ProfileField; 17] = [
        ProfileField::Age,
        ProfileField::Gender,
        ProfileField::HeightCm,
        ProfileField::WeightKg,
        ProfileField::ActivityLevel,
        ProfileField::SleepHours,
        ProfileField::StressLevel,
        ProfileField::Smoker,
        ProfileField::AlcoholUnitsPerWeek,
        ProfileField::DietType,
        ProfileField::WaterLiters,
        ProfileField::ChronicConditions,
        ProfileField::Allergies,
        ProfileField::Medications,
        ProfileField::HealthGoals,
        ProfileField::LabResults,
        ProfileField::RecommendationSettings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::Age => "Age",
            ProfileField::Gender => "Gender",
            ProfileField::HeightCm => "Height (cm)",
            ProfileField::WeightKg => "Weight (kg)",
            ProfileField::ActivityLevel => "Activity level",
            ProfileField::SleepHours => "Sleep (hours/night)",
            ProfileField::StressLevel => "Stress level (1-10)",
            ProfileField::Smoker => "Smoker",
            ProfileField::AlcoholUnitsPerWeek => "Alcohol (units/week)",
            ProfileField::DietType => "Diet",
            ProfileField::WaterLiters => "Water (litres/day)",
            ProfileField::ChronicConditions => "Chronic conditions",
            ProfileField::Allergies => "Allergies",
            ProfileField::Medications => "Medications",
            ProfileField::HealthGoals => "Health goals",
            ProfileField::LabResults => "Lab results",
            ProfileField::RecommendationSettings => "Recommendation settings",
        }
    }

    /// Whether the field carries a value. Collections count once non-empty;
    /// recommendation settings count once any focus area is chosen.
    pub fn is_filled(&self, data: &ProfileData) -> bool {
        match self {
            ProfileField::Age => data.age.is_some(),
            ProfileField::Gender => data.gender.is_some(),
            ProfileField::HeightCm => data.height_cm.is_some(),
            ProfileField::WeightKg => data.weight_kg.is_some(),
            ProfileField::ActivityLevel => data.activity_level.is_some(),
            ProfileField::SleepHours => data.sleep_hours.is_some(),
            ProfileField::StressLevel => data.stress_level.is_some(),
            ProfileField::Smoker => data.smoker.is_some(),
            ProfileField::AlcoholUnitsPerWeek => data.alcohol_units_per_week.is_some(),
            ProfileField::DietType => data.diet_type.is_some(),
            ProfileField::WaterLiters => data.water_liters.is_some(),
            ProfileField::ChronicConditions => !data.chronic_conditions.is_empty(),
            ProfileField::Allergies => !data.allergies.is_empty(),
            ProfileField::Medications => !data.medications.is_empty(),
            ProfileField::HealthGoals => !data.health_goals.is_empty(),
            ProfileField::LabResults => !data.lab_results.is_empty(),
            ProfileField::RecommendationSettings => {
                !data.recommendation_settings.focus_areas.is_empty()
            }
        }
    }

    /// Human-readable rendering of the field's current value.
    pub fn display_value(&self, data: &ProfileData) -> Option<String> {
        fn list(values: &[String]) -> Option<String> {
            if values.is_empty() {
                None
            } else {
                Some(values.join(", "))
            }
        }

        match self {
            ProfileField::Age => data.age.map(|v| v.to_string()),
            ProfileField::Gender => data.gender.map(|v| v.label().to_string()),
            ProfileField::HeightCm => data.height_cm.map(|v| format!("{v:.1}")),
            ProfileField::WeightKg => data.weight_kg.map(|v| format!("{v:.1}")),
            ProfileField::ActivityLevel => data.activity_level.map(|v| v.label().to_string()),
            ProfileField::SleepHours => data.sleep_hours.map(|v| format!("{v:.1}")),
            ProfileField::StressLevel => data.stress_level.map(|v| v.to_string()),
            ProfileField::Smoker => data.smoker.map(|v| if v { "Yes" } else { "No" }.to_string()),
            ProfileField::AlcoholUnitsPerWeek => {
                data.alcohol_units_per_week.map(|v| v.to_string())
            }
            ProfileField::DietType => data.diet_type.map(|v| v.label().to_string()),
            ProfileField::WaterLiters => data.water_liters.map(|v| format!("{v:.1}")),
            ProfileField::ChronicConditions => list(&data.chronic_conditions),
            ProfileField::Allergies => list(&data.allergies),
            ProfileField::Medications => list(&data.medications),
            ProfileField::HealthGoals => list(&data.health_goals),
            ProfileField::LabResults => {
                if data.lab_results.is_empty() {
                    None
                } else {
                    Some(format!("{} values", data.lab_results.len()))
                }
            }
            ProfileField::RecommendationSettings => {
                let settings = &data.recommendation_settings;
                list(&settings.focus_areas)
                    .map(|areas| format!("{} ({})", areas, settings.detail_level.label()))
            }
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns `items` with `item` added when absent or removed when present.
///
/// Checkbox groups use this to build the full replacement list they hand to
/// a [`ProfileUpdate`].
pub fn toggle_item(items: &[String], item: &str) -> Vec<String> {
    if items.iter().any(|existing| existing == item) {
        items
            .iter()
            .filter(|existing| existing.as_str() != item)
            .cloned()
            .collect()
    } else {
        let mut next = items.to_vec();
        next.push(item.to_string());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_partial_updates_keep_earlier_fields() {
        let mut data = ProfileData::new();
        data.apply(ProfileUpdate::Age(Some(41)));
        data.apply(ProfileUpdate::SleepHours(Some(7.5)));
        assert_eq!(data.age, Some(41));
        assert_eq!(data.sleep_hours, Some(7.5));
    }

    #[test]
    fn collections_are_replaced_not_appended() {
        let mut data = ProfileData::new();
        data.apply(ProfileUpdate::Allergies(vec!["pollen".into()]));
        data.apply(ProfileUpdate::Allergies(vec!["peanuts".into()]));
        assert_eq!(data.allergies, vec!["peanuts".to_string()]);
    }

    #[test]
    fn nested_map_is_replaced_wholesale() {
        let mut data = ProfileData::new();
        data.apply(ProfileUpdate::LabResults(BTreeMap::from([
            ("glucose".to_string(), 92.0),
            ("hdl".to_string(), 55.0),
        ])));
        data.apply(ProfileUpdate::LabResults(BTreeMap::from([(
            "ldl".to_string(),
            110.0,
        )])));
        assert_eq!(data.lab_results.len(), 1);
        assert_eq!(data.lab_results.get("ldl"), Some(&110.0));
    }

    #[test]
    fn clearing_a_scalar_sets_none() {
        let mut data = ProfileData::new();
        data.apply(ProfileUpdate::WeightKg(Some(80.0)));
        data.apply(ProfileUpdate::WeightKg(None));
        assert_eq!(data.weight_kg, None);
    }

    #[test]
    fn toggle_goals_scenario() {
        let mut data = ProfileData::new();
        for goal in ["weight_loss", "energy_boost", "weight_loss"] {
            let next = toggle_item(&data.health_goals, goal);
            data.apply(ProfileUpdate::HealthGoals(next));
        }
        assert_eq!(data.health_goals, vec!["energy_boost".to_string()]);
    }

    #[test]
    fn bmi_requires_height_and_weight() {
        let mut data = ProfileData::new();
        assert_eq!(data.bmi(), None);
        data.height_cm = Some(180.0);
        data.weight_kg = Some(81.0);
        let bmi = data.bmi().expect("bmi");
        assert!((bmi - 25.0).abs() < 1e-9);
    }

    #[test]
    fn update_reports_its_field() {
        assert_eq!(
            ProfileUpdate::HealthGoals(Vec::new()).field(),
            ProfileField::HealthGoals
        );
        assert_eq!(ProfileUpdate::Age(None).field(), ProfileField::Age);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut data = ProfileData::new();
        data.height_cm = Some(170.0);
        data.health_goals = vec!["sleep_better".into()];
        let json = serde_json::to_value(&data).expect("serialize");
        assert_eq!(json["heightCm"], 170.0);
        assert_eq!(json["healthGoals"][0], "sleep_better");
        let back: ProfileData = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, data);
    }

    #[test]
    fn missing_keys_deserialize_to_defaults() {
        let data: ProfileData = serde_json::from_str(r#"{"age": 30}"#).expect("partial record");
        assert_eq!(data.age, Some(30));
        assert!(data.health_goals.is_empty());
        assert_eq!(data.filled_fields(), 1);
    }
}
