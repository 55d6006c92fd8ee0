//! Biomarker catalog used by the biological-age wizard.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Panel a biomarker belongs to. Tiers are cumulative: an extended panel
/// includes every basic marker, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiomarkerTier {
    Basic,
    Extended,
    Comprehensive,
}

impl BiomarkerTier {
    pub const ALL: [BiomarkerTier; 3] = [
        BiomarkerTier::Basic,
        BiomarkerTier::Extended,
        BiomarkerTier::Comprehensive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BiomarkerTier::Basic => "Basic",
            BiomarkerTier::Extended => "Extended",
            BiomarkerTier::Comprehensive => "Comprehensive",
        }
    }
}

impl fmt::Display for BiomarkerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiomarkerCategory {
    Metabolic,
    Lipids,
    Kidney,
    Liver,
    Inflammation,
    BloodCount,
    Hormones,
    Vitamins,
    Cardiovascular,
}

impl BiomarkerCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BiomarkerCategory::Metabolic => "Metabolic",
            BiomarkerCategory::Lipids => "Lipids",
            BiomarkerCategory::Kidney => "Kidney",
            BiomarkerCategory::Liver => "Liver",
            BiomarkerCategory::Inflammation => "Inflammation",
            BiomarkerCategory::BloodCount => "Blood count",
            BiomarkerCategory::Hormones => "Hormones",
            BiomarkerCategory::Vitamins => "Vitamins & minerals",
            BiomarkerCategory::Cardiovascular => "Cardiovascular",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BiomarkerDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub tier: BiomarkerTier,
    pub category: BiomarkerCategory,
}

impl BiomarkerDefinition {
    const fn new(
        id: &'static str,
        label: &'static str,
        unit: &'static str,
        tier: BiomarkerTier,
        category: BiomarkerCategory,
    ) -> Self {
        Self {
            id,
            label,
            unit,
            tier,
            category,
        }
    }

    pub fn prompt_label(&self) -> String {
        format!("{} ({})", self.label, self.unit)
    }
}

/// Immutable table of known biomarkers, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct BiomarkerCatalog {
    entries: Vec<BiomarkerDefinition>,
}

impl BiomarkerCatalog {
    pub fn new(entries: Vec<BiomarkerDefinition>) -> Self {
        Self { entries }
    }

    /// Thirty markers, ten per tier.
    pub fn standard() -> Self {
        use BiomarkerCategory as C;
        use BiomarkerTier::{Basic, Comprehensive, Extended};

        Self::new(vec![
            BiomarkerDefinition::new("glucose", "Fasting glucose", "mg/dL", Basic, C::Metabolic),
            BiomarkerDefinition::new("hba1c", "HbA1c", "%", Basic, C::Metabolic),
            BiomarkerDefinition::new("total_cholesterol", "Total cholesterol", "mg/dL", Basic, C::Lipids),
            BiomarkerDefinition::new("hdl", "HDL cholesterol", "mg/dL", Basic, C::Lipids),
            BiomarkerDefinition::new("ldl", "LDL cholesterol", "mg/dL", Basic, C::Lipids),
            BiomarkerDefinition::new("triglycerides", "Triglycerides", "mg/dL", Basic, C::Lipids),
            BiomarkerDefinition::new("creatinine", "Creatinine", "mg/dL", Basic, C::Kidney),
            BiomarkerDefinition::new("albumin", "Albumin", "g/dL", Basic, C::Liver),
            BiomarkerDefinition::new("crp", "C-reactive protein", "mg/L", Basic, C::Inflammation),
            BiomarkerDefinition::new("systolic_bp", "Systolic blood pressure", "mmHg", Basic, C::Cardiovascular),
            BiomarkerDefinition::new("alt", "ALT", "U/L", Extended, C::Liver),
            BiomarkerDefinition::new("ast", "AST", "U/L", Extended, C::Liver),
            BiomarkerDefinition::new("ggt", "GGT", "U/L", Extended, C::Liver),
            BiomarkerDefinition::new("alkaline_phosphatase", "Alkaline phosphatase", "U/L", Extended, C::Liver),
            BiomarkerDefinition::new("urea", "Blood urea nitrogen", "mg/dL", Extended, C::Kidney),
            BiomarkerDefinition::new("egfr", "eGFR", "mL/min/1.73m2", Extended, C::Kidney),
            BiomarkerDefinition::new("wbc", "White blood cells", "10^3/uL", Extended, C::BloodCount),
            BiomarkerDefinition::new("rbc", "Red blood cells", "10^6/uL", Extended, C::BloodCount),
            BiomarkerDefinition::new("hemoglobin", "Hemoglobin", "g/dL", Extended, C::BloodCount),
            BiomarkerDefinition::new("platelets", "Platelets", "10^3/uL", Extended, C::BloodCount),
            BiomarkerDefinition::new("lymphocyte_pct", "Lymphocytes", "%", Comprehensive, C::BloodCount),
            BiomarkerDefinition::new("mcv", "Mean corpuscular volume", "fL", Comprehensive, C::BloodCount),
            BiomarkerDefinition::new("rdw", "Red cell distribution width", "%", Comprehensive, C::BloodCount),
            BiomarkerDefinition::new("insulin", "Fasting insulin", "uIU/mL", Comprehensive, C::Metabolic),
            BiomarkerDefinition::new("tsh", "TSH", "mIU/L", Comprehensive, C::Hormones),
            BiomarkerDefinition::new("cortisol", "Cortisol", "ug/dL", Comprehensive, C::Hormones),
            BiomarkerDefinition::new("vitamin_d", "Vitamin D (25-OH)", "ng/mL", Comprehensive, C::Vitamins),
            BiomarkerDefinition::new("ferritin", "Ferritin", "ng/mL", Comprehensive, C::Vitamins),
            BiomarkerDefinition::new("homocysteine", "Homocysteine", "umol/L", Comprehensive, C::Cardiovascular),
            BiomarkerDefinition::new("uric_acid", "Uric acid", "mg/dL", Comprehensive, C::Metabolic),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &BiomarkerDefinition> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&BiomarkerDefinition> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Markers introduced by exactly this tier.
    pub fn in_tier(&self, tier: BiomarkerTier) -> Vec<&BiomarkerDefinition> {
        self.entries.iter().filter(|entry| entry.tier == tier).collect()
    }

    /// Ids of every marker at or below `tier`.
    pub fn ids_up_to(&self, tier: BiomarkerTier) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|entry| entry.tier <= tier)
            .map(|entry| entry.id)
            .collect()
    }

    pub fn all_ids(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    /// Counts catalog markers that carry a value in `lab_results`.
    pub fn filled_count(&self, lab_results: &BTreeMap<String, f64>) -> usize {
        self.entries
            .iter()
            .filter(|entry| lab_results.contains_key(entry.id))
            .count()
    }
}

/// Parses a lab value typed by the user.
///
/// Accepts a comma as decimal separator. Returns `None` for anything that is
/// not a finite, non-negative number so the caller can skip the update.
pub fn parse_lab_value(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_catalog_has_ten_markers_per_tier() {
        let catalog = BiomarkerCatalog::standard();
        for tier in BiomarkerTier::ALL {
            assert_eq!(catalog.in_tier(tier).len(), 10, "tier {tier}");
        }
        let ids: HashSet<_> = catalog.all_ids().into_iter().collect();
        assert_eq!(ids.len(), catalog.len(), "ids must be unique");
    }

    #[test]
    fn cumulative_buckets_grow_by_tier() {
        let catalog = BiomarkerCatalog::standard();
        assert_eq!(catalog.ids_up_to(BiomarkerTier::Basic).len(), 10);
        assert_eq!(catalog.ids_up_to(BiomarkerTier::Extended).len(), 20);
        assert_eq!(catalog.ids_up_to(BiomarkerTier::Comprehensive).len(), 30);
    }

    #[test]
    fn filled_count_ignores_unknown_keys() {
        let catalog = BiomarkerCatalog::standard();
        let results = BTreeMap::from([
            ("glucose".to_string(), 90.0),
            ("not_a_marker".to_string(), 1.0),
        ]);
        assert_eq!(catalog.filled_count(&results), 1);
    }

    #[test]
    fn parse_lab_value_rejects_garbage() {
        assert_eq!(parse_lab_value("5.4"), Some(5.4));
        assert_eq!(parse_lab_value(" 5,4 "), Some(5.4));
        assert_eq!(parse_lab_value("abc"), None);
        assert_eq!(parse_lab_value("-1"), None);
        assert_eq!(parse_lab_value("NaN"), None);
        assert_eq!(parse_lab_value(""), None);
    }
}
