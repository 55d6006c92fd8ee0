use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

use crate::{
    domain::{nutrition::NutritionDiary, ProfileData},
    errors::{Result, VitalityError},
    utils::{canonical_name, ensure_dir, write_atomic, PathResolver},
};

use super::ProfileStore;

const FILE_EXTENSION: &str = "json";

pub const PROFILE_SCHEMA_VERSION: u32 = 1;

/// On-disk envelope around a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    pub schema_version: u32,
    pub id: String,
    pub updated_at: DateTime<Utc>,
    pub profile: ProfileData,
}

impl StoredProfile {
    pub fn new(id: &str, profile: ProfileData) -> Self {
        Self {
            schema_version: PROFILE_SCHEMA_VERSION,
            id: id.to_string(),
            updated_at: Utc::now(),
            profile,
        }
    }
}

/// Stores one JSON document per profile under `<root>/profiles`, and one
/// nutrition diary per profile under `<root>/diaries`.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    root: PathBuf,
    profiles_dir: PathBuf,
    diaries_dir: PathBuf,
}

impl JsonProfileStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let app_root = PathResolver::resolve_base(root);
        ensure_dir(&app_root)?;
        let profiles_dir = PathResolver::profile_dir_in(&app_root);
        let diaries_dir = PathResolver::diary_dir_in(&app_root);
        ensure_dir(&profiles_dir)?;
        ensure_dir(&diaries_dir)?;
        Ok(Self {
            root: app_root,
            profiles_dir,
            diaries_dir,
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn profile_path(&self, id: &str) -> PathBuf {
        self.profiles_dir
            .join(format!("{}.{}", canonical_name(id), FILE_EXTENSION))
    }

    pub fn diary_path(&self, id: &str) -> PathBuf {
        self.diaries_dir
            .join(format!("{}.{}", canonical_name(id), FILE_EXTENSION))
    }

    /// Stored envelope for `id`. Ids that share a file name with a
    /// different profile are an error rather than a silent match.
    pub fn load_record(&self, id: &str) -> Result<Option<StoredProfile>> {
        let path = self.profile_path(id);
        let Some(record) = read_record(&path)? else {
            return Ok(None);
        };
        if record.id != id {
            return Err(id_collision(id, &record.id, &path));
        }
        Ok(Some(record))
    }

    /// Empty diary when none has been written yet.
    pub fn load_diary(&self, id: &str) -> Result<NutritionDiary> {
        let path = self.diary_path(id);
        if !path.exists() {
            return Ok(NutritionDiary::new());
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save_diary(&self, id: &str, diary: &NutritionDiary) -> Result<()> {
        let path = self.diary_path(id);
        let json = serde_json::to_string_pretty(diary)?;
        write_atomic(&path, &json)?;
        debug!(profile = id, entries = diary.entries.len(), "diary saved");
        Ok(())
    }
}

impl ProfileStore for JsonProfileStore {
    fn load(&self, id: &str) -> Result<Option<ProfileData>> {
        Ok(self.load_record(id)?.map(|record| record.profile))
    }

    fn save(&self, id: &str, profile: &ProfileData) -> Result<()> {
        let path = self.profile_path(id);
        if let Some(existing) = read_record(&path)? {
            if existing.id != id {
                return Err(id_collision(id, &existing.id, &path));
            }
        }
        let record = StoredProfile::new(id, profile.clone());
        let json = serde_json::to_string_pretty(&record)?;
        write_atomic(&path, &json)?;
        info!(profile = id, path = %path.display(), "profile saved");
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.profiles_dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.profiles_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            match read_record(&path) {
                Ok(Some(record)) => ids.push(record.id),
                Ok(None) => {}
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable profile")
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

fn read_record(path: &Path) -> Result<Option<StoredProfile>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    let record: StoredProfile = serde_json::from_str(&data)?;
    if record.schema_version > PROFILE_SCHEMA_VERSION {
        return Err(VitalityError::StorageError(format!(
            "profile `{}` is from a newer schema version",
            path.display()
        )));
    }
    Ok(Some(record))
}

fn id_collision(requested: &str, stored: &str, path: &Path) -> VitalityError {
    VitalityError::StorageError(format!(
        "profile id `{requested}` maps to `{}`, which belongs to `{stored}`",
        path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::nutrition::{DiaryEntry, Macros};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonProfileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonProfileStore::new(Some(temp.path().to_path_buf())).expect("json store");
        (store, temp)
    }

    #[test]
    fn missing_profile_loads_as_none() {
        let (store, _guard) = store_with_temp_dir();
        assert!(store.load("nobody").expect("load").is_none());
        let err = store.load_required("nobody").expect_err("not found");
        assert!(matches!(err, VitalityError::ProfileNotFound(ref id) if id == "nobody"));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (store, _guard) = store_with_temp_dir();
        let mut profile = ProfileData::new();
        profile.age = Some(39);
        profile.health_goals = vec!["longevity".into()];
        store.save("Jane Doe", &profile).expect("save");

        assert_eq!(store.load("Jane Doe").expect("load"), Some(profile));
        assert_eq!(store.list().expect("list"), vec!["Jane Doe".to_string()]);
        assert!(store.profile_path("Jane Doe").ends_with("jane-doe.json"));
        let record = store.load_record("Jane Doe").expect("record").expect("present");
        assert_eq!(record.schema_version, PROFILE_SCHEMA_VERSION);
        assert_eq!(record.id, "Jane Doe");
    }

    #[test]
    fn newer_schema_is_rejected() {
        let (store, _guard) = store_with_temp_dir();
        let mut record = StoredProfile::new("future", ProfileData::new());
        record.schema_version = PROFILE_SCHEMA_VERSION + 1;
        let json = serde_json::to_string(&record).expect("serialize");
        write_atomic(&store.profile_path("future"), &json).expect("write");

        let err = store.load("future").expect_err("schema too new");
        assert!(matches!(err, VitalityError::StorageError(ref msg) if msg.contains("newer schema")));
    }

    #[test]
    fn ids_sharing_a_file_name_do_not_overwrite_each_other() {
        let (store, _guard) = store_with_temp_dir();
        let mut alice = ProfileData::new();
        alice.age = Some(30);
        store.save("Alice", &alice).expect("save Alice");

        let mut other = ProfileData::new();
        other.age = Some(70);
        let err = store.save("alice", &other).expect_err("lowercase id collides");
        assert!(matches!(err, VitalityError::StorageError(ref msg) if msg.contains("belongs to `Alice`")));
        assert_eq!(store.load("Alice").expect("load").and_then(|p| p.age), Some(30));

        let err = store.load("alice").expect_err("lowercase id is not Alice");
        assert!(matches!(err, VitalityError::StorageError(_)));
        assert_eq!(store.list().expect("list"), vec!["Alice".to_string()]);
    }

    #[test]
    fn slugged_ids_do_not_load_another_profile() {
        let (store, _guard) = store_with_temp_dir();
        store.save("a/b", &ProfileData::new()).expect("save");

        assert!(store.load("a/b").expect("load").is_some());
        assert!(matches!(
            store.load("a-b"),
            Err(VitalityError::StorageError(_))
        ));
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let (store, _guard) = store_with_temp_dir();
        fs::write(store.profile_path("broken"), "{not json").expect("write");
        assert!(matches!(
            store.load("broken"),
            Err(VitalityError::StorageError(_))
        ));
    }

    #[test]
    fn diary_roundtrip() {
        let (store, _guard) = store_with_temp_dir();
        assert!(store.load_diary("p1").expect("empty diary").entries.is_empty());

        let mut diary = NutritionDiary::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).expect("date");
        diary.add(DiaryEntry::new(date, "Oats", 80.0, Macros::new(300.0, 10.0, 54.0, 5.0)));
        store.save_diary("p1", &diary).expect("save diary");
        assert_eq!(store.load_diary("p1").expect("load diary"), diary);
    }
}
