pub mod json_backend;

use crate::domain::ProfileData;
use crate::errors::{Result, VitalityError};

/// Abstraction over persistence backends able to hold health profiles.
///
/// Failures are returned to the caller untouched; nothing here retries.
pub trait ProfileStore {
    /// `Ok(None)` when no profile exists under `id`.
    fn load(&self, id: &str) -> Result<Option<ProfileData>>;
    fn save(&self, id: &str, profile: &ProfileData) -> Result<()>;
    /// Ids exactly as they were saved, sorted.
    fn list(&self) -> Result<Vec<String>>;

    fn load_required(&self, id: &str) -> Result<ProfileData> {
        self.load(id)?
            .ok_or_else(|| VitalityError::ProfileNotFound(id.to_string()))
    }
}

pub use json_backend::{JsonProfileStore, StoredProfile, PROFILE_SCHEMA_VERSION};
