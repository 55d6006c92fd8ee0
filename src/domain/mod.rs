pub mod biomarker;
pub mod common;
pub mod nutrition;
pub mod profile;
pub mod recommendation;

pub use biomarker::{BiomarkerCatalog, BiomarkerCategory, BiomarkerDefinition, BiomarkerTier};
pub use common::ChoiceOption;
pub use profile::{ProfileData, ProfileField, ProfileUpdate};
