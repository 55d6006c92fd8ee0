//! Request and response shapes exchanged with the recommendation generator.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::biomarker::BiomarkerCatalog;
use super::profile::{ProfileData, ProfileField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    HealthProfile,
    BiologicalAge,
}

/// Structured prompt handed to the generator. Carries a snapshot of the
/// profile so the caller's data cannot change underneath a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationPrompt {
    pub kind: PromptKind,
    pub profile: ProfileData,
}

impl RecommendationPrompt {
    pub fn health_profile(profile: &ProfileData) -> Self {
        Self {
            kind: PromptKind::HealthProfile,
            profile: profile.clone(),
        }
    }

    pub fn biological_age(profile: &ProfileData) -> Self {
        Self {
            kind: PromptKind::BiologicalAge,
            profile: profile.clone(),
        }
    }

    /// Renders the prompt as plain text for text-generation backends.
    pub fn to_text(&self, catalog: &BiomarkerCatalog) -> String {
        let mut out = String::new();
        let task = match self.kind {
            PromptKind::HealthProfile => "Provide personalised health recommendations.",
            PromptKind::BiologicalAge => {
                "Estimate biological age from the lab results and explain the main drivers."
            }
        };
        let _ = writeln!(out, "{task}");
        let _ = writeln!(out, "Profile:");
        for field in ProfileField::ALL {
            if field == ProfileField::LabResults {
                continue;
            }
            if let Some(value) = field.display_value(&self.profile) {
                let _ = writeln!(out, "- {}: {}", field.label(), value);
            }
        }
        if !self.profile.lab_results.is_empty() {
            let _ = writeln!(out, "Lab results:");
            for (id, value) in &self.profile.lab_results {
                match catalog.get(id) {
                    Some(def) => {
                        let _ = writeln!(out, "- {}: {} {}", def.label, value, def.unit);
                    }
                    None => {
                        let _ = writeln!(out, "- {id}: {value}");
                    }
                }
            }
        }
        out
    }
}

/// Fixed-schema response rendered verbatim by the front end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredRecommendation {
    pub summary: String,
    pub biological_age: Option<f64>,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub lifestyle_tips: Vec<String>,
    pub warnings: Vec<String>,
    pub labels: BTreeMap<String, String>,
}

impl StructuredRecommendation {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.summary.is_empty() {
            lines.push(self.summary.clone());
        }
        if let Some(age) = self.biological_age {
            lines.push(format!("Estimated biological age: {age:.1}"));
        }
        for (label, value) in &self.labels {
            lines.push(format!("{label}: {value}"));
        }
        let sections = [
            ("Key findings", &self.key_findings),
            ("Recommendations", &self.recommendations),
            ("Lifestyle tips", &self.lifestyle_tips),
            ("Warnings", &self.warnings),
        ];
        for (title, items) in sections {
            if items.is_empty() {
                continue;
            }
            lines.push(format!("{title}:"));
            lines.extend(items.iter().map(|item| format!("  - {item}")));
        }
        lines
    }
}
