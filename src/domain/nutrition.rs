//! Nutrition diary and macro arithmetic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
const KCAL_PER_GRAM_CARBS: f64 = 4.0;
const KCAL_PER_GRAM_FAT: f64 = 9.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub food: String,
    pub grams: f64,
    pub kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl DiaryEntry {
    pub fn new(date: NaiveDate, food: impl Into<String>, grams: f64, macros: Macros) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            food: food.into(),
            grams,
            kcal: macros.kcal,
            protein_g: macros.protein_g,
            carbs_g: macros.carbs_g,
            fat_g: macros.fat_g,
        }
    }
}

/// Energy and macronutrient amounts, either for one entry or summed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Macros {
    pub kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl Macros {
    pub fn new(kcal: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        Self {
            kcal,
            protein_g,
            carbs_g,
            fat_g,
        }
    }

    fn add(&mut self, entry: &DiaryEntry) {
        self.kcal += entry.kcal;
        self.protein_g += entry.protein_g;
        self.carbs_g += entry.carbs_g;
        self.fat_g += entry.fat_g;
    }
}

/// Share of energy coming from each macronutrient, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein_pct: f64,
    pub carbs_pct: f64,
    pub fat_pct: f64,
}

/// Daily targets used for goal tracking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionGoals {
    pub daily_kcal: f64,
    pub protein_pct: f64,
    pub carbs_pct: f64,
    pub fat_pct: f64,
}

impl Default for NutritionGoals {
    fn default() -> Self {
        Self {
            daily_kcal: 2000.0,
            protein_pct: 25.0,
            carbs_pct: 45.0,
            fat_pct: 30.0,
        }
    }
}

impl NutritionGoals {
    /// Gram targets implied by the energy goal and the percentage split.
    pub fn gram_targets(&self) -> Macros {
        Macros {
            kcal: self.daily_kcal,
            protein_g: self.daily_kcal * self.protein_pct / 100.0 / KCAL_PER_GRAM_PROTEIN,
            carbs_g: self.daily_kcal * self.carbs_pct / 100.0 / KCAL_PER_GRAM_CARBS,
            fat_g: self.daily_kcal * self.fat_pct / 100.0 / KCAL_PER_GRAM_FAT,
        }
    }
}

/// Percent of each daily target reached, capped at 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub kcal_pct: f64,
    pub protein_pct: f64,
    pub carbs_pct: f64,
    pub fat_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionDiary {
    pub entries: Vec<DiaryEntry>,
}

impl NutritionDiary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: DiaryEntry) -> Uuid {
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    pub fn remove(&mut self, id: Uuid) -> Option<DiaryEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn entries_on(&self, date: NaiveDate) -> impl Iterator<Item = &DiaryEntry> {
        self.entries.iter().filter(move |entry| entry.date == date)
    }

    pub fn daily_totals(&self, date: NaiveDate) -> Macros {
        let mut totals = Macros::default();
        for entry in self.entries_on(date) {
            totals.add(entry);
        }
        totals
    }
}

/// Splits the energy derived from macronutrient grams into percentages.
/// Zero energy yields a zero split.
pub fn macro_split(totals: &Macros) -> MacroSplit {
    let protein_kcal = totals.protein_g * KCAL_PER_GRAM_PROTEIN;
    let carbs_kcal = totals.carbs_g * KCAL_PER_GRAM_CARBS;
    let fat_kcal = totals.fat_g * KCAL_PER_GRAM_FAT;
    let energy = protein_kcal + carbs_kcal + fat_kcal;
    if energy <= 0.0 {
        return MacroSplit::default();
    }
    MacroSplit {
        protein_pct: protein_kcal / energy * 100.0,
        carbs_pct: carbs_kcal / energy * 100.0,
        fat_pct: fat_kcal / energy * 100.0,
    }
}

pub fn goal_progress(totals: &Macros, goals: &NutritionGoals) -> GoalProgress {
    let targets = goals.gram_targets();
    GoalProgress {
        kcal_pct: capped_ratio(totals.kcal, targets.kcal),
        protein_pct: capped_ratio(totals.protein_g, targets.protein_g),
        carbs_pct: capped_ratio(totals.carbs_g, targets.carbs_g),
        fat_pct: capped_ratio(totals.fat_g, targets.fat_g),
    }
}

fn capped_ratio(value: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (value / target * 100.0).clamp(0.0, 100.0)
}
