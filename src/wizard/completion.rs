//! Section completion predicates.
//!
//! Everything here is a pure function of the profile snapshot: the same
//! inputs always produce the same answer and nothing is mutated.

use crate::domain::profile::{ProfileData, ProfileField};

use super::registry::{SectionDescriptor, SectionRegistry};

/// The set of values a section's threshold counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldBucket {
    Empty,
    Profile(Vec<ProfileField>),
    /// Biomarker ids looked up in `ProfileData::lab_results`.
    LabResults(Vec<&'static str>),
}

impl FieldBucket {
    pub fn len(&self) -> usize {
        match self {
            FieldBucket::Empty => 0,
            FieldBucket::Profile(fields) => fields.len(),
            FieldBucket::LabResults(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn filled_count(&self, data: &ProfileData) -> usize {
        match self {
            FieldBucket::Empty => 0,
            FieldBucket::Profile(fields) => {
                fields.iter().filter(|field| field.is_filled(data)).count()
            }
            FieldBucket::LabResults(ids) => ids
                .iter()
                .filter(|id| data.lab_results.contains_key(**id))
                .count(),
        }
    }
}

/// Whether `section` holds enough data to be flagged complete.
///
/// Sections without a threshold are never reported complete here; they are
/// freely navigable and only the first one is marked, at initialization.
pub fn is_complete(data: &ProfileData, section: &SectionDescriptor) -> bool {
    match section.min_items {
        Some(min) => section.bucket.filled_count(data) >= min,
        None => false,
    }
}

/// Keyed variant of [`is_complete`].
///
/// # Panics
///
/// Panics when `section_id` is not registered.
pub fn is_section_complete(data: &ProfileData, registry: &SectionRegistry, section_id: &str) -> bool {
    is_complete(data, registry.by_id(section_id))
}
