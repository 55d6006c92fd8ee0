mod common;

use std::fs;

use chrono::NaiveDate;
use common::{temp_store, value, MockInteraction};
use vitality_core::domain::nutrition::{DiaryEntry, Macros};
use vitality_core::domain::profile::ActivityLevel;
use vitality_core::domain::recommendation::{PromptKind, RecommendationPrompt};
use vitality_core::domain::{BiomarkerCatalog, ProfileData};
use vitality_core::errors::VitalityError;
use vitality_core::recommendation::{FileRecommendationSource, RecommendationGenerator};
use vitality_core::storage::{ProfileStore, PROFILE_SCHEMA_VERSION};
use vitality_core::wizard::{FlowConfig, FormEngine, FormResult, FormSession, NavAction};

#[test]
fn profile_round_trips_through_json_store() {
    let (_guard, store) = temp_store();
    let profile = ProfileData {
        age: Some(38),
        activity_level: Some(ActivityLevel::Moderate),
        medications: vec!["metformin".into()],
        ..ProfileData::default()
    };

    store.save("Jane Doe", &profile).expect("save profile");
    let loaded = store.load_required("Jane Doe").expect("load profile");

    assert_eq!(loaded, profile);
    assert_eq!(store.list().expect("list"), vec!["Jane Doe".to_string()]);
    assert!(store.profile_path("Jane Doe").ends_with("profiles/jane-doe.json"));
}

#[test]
fn case_variants_of_an_id_keep_their_own_data() {
    let (_guard, store) = temp_store();
    let alice = ProfileData {
        age: Some(30),
        ..ProfileData::default()
    };
    store.save("Alice", &alice).expect("save Alice");

    let later = ProfileData {
        age: Some(70),
        ..ProfileData::default()
    };
    assert!(store.save("alice", &later).is_err());
    assert!(store.load_required("alice").is_err());
    assert_eq!(store.load_required("Alice").expect("load Alice"), alice);
}

#[test]
fn missing_profile_is_reported() {
    let (_guard, store) = temp_store();
    assert!(store.load("ghost").expect("load").is_none());
    let err = store.load_required("ghost").expect_err("missing");
    assert!(matches!(err, VitalityError::ProfileNotFound(ref id) if id == "ghost"));
}

#[test]
fn newer_schema_versions_are_rejected() {
    let (_guard, store) = temp_store();
    store.save("p1", &ProfileData::new()).expect("save");
    let path = store.profile_path("p1");
    let raw = fs::read_to_string(&path).expect("read");
    let bumped = raw.replace(
        &format!("\"schemaVersion\": {PROFILE_SCHEMA_VERSION}"),
        &format!("\"schemaVersion\": {}", PROFILE_SCHEMA_VERSION + 1),
    );
    fs::write(&path, bumped).expect("write");

    let err = store.load("p1").expect_err("newer schema");
    assert!(matches!(err, VitalityError::StorageError(_)));
}

#[test]
fn session_resumes_from_stored_profile() {
    let (_guard, store) = temp_store();
    let catalog = BiomarkerCatalog::standard();

    let session = FormSession::open(FlowConfig::profile_mobile(), catalog.clone(), &store, "p1")
        .expect("open new profile");
    let mut interaction = MockInteraction::new()
        .with_prompts([value("44")])
        .with_actions([NavAction::Save, NavAction::Cancel]);
    let result = FormEngine::new()
        .with_store(&store, "p1")
        .run(session, &mut interaction);
    assert_eq!(result, FormResult::Cancelled);

    let reopened = FormSession::open(FlowConfig::profile_mobile(), catalog, &store, "p1")
        .expect("reopen");
    assert_eq!(reopened.data().age, Some(44));
    assert!(!reopened.is_dirty());
    assert_eq!(reopened.navigator().current_index(), 0);
}

#[test]
fn diaries_are_stored_per_profile() {
    let (_guard, store) = temp_store();
    let day = NaiveDate::from_ymd_opt(2024, 3, 1).expect("date");

    let mut diary = store.load_diary("p1").expect("empty diary");
    assert!(diary.entries.is_empty());
    diary.add(DiaryEntry::new(day, "Oats", 80.0, Macros::new(300.0, 10.0, 54.0, 5.0)));
    store.save_diary("p1", &diary).expect("save diary");

    let reloaded = store.load_diary("p1").expect("reload");
    assert_eq!(reloaded, diary);
    assert_eq!(reloaded.daily_totals(day).kcal, 300.0);
    assert!(store.load_diary("p2").expect("other").entries.is_empty());
}

#[test]
fn file_source_serves_responses_by_prompt_kind() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("responses.json");
    fs::write(
        &path,
        r#"{
            "health_profile": { "summary": "Sleep more." },
            "biological_age": { "summary": "Looking good.", "biologicalAge": 39.0 }
        }"#,
    )
    .expect("write responses");
    let source = FileRecommendationSource::new(&path);
    let profile = ProfileData::new();

    let health = source
        .generate(&RecommendationPrompt::health_profile(&profile))
        .expect("health response");
    assert_eq!(health.summary, "Sleep more.");

    let bioage = source
        .generate(&RecommendationPrompt::biological_age(&profile))
        .expect("bioage response");
    assert_eq!(bioage.biological_age, Some(39.0));
    assert_eq!(
        RecommendationPrompt::biological_age(&profile).kind,
        PromptKind::BiologicalAge
    );
}

#[test]
fn missing_response_file_is_a_recommendation_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = FileRecommendationSource::new(dir.path().join("absent.json"));
    let err = source
        .generate(&RecommendationPrompt::health_profile(&ProfileData::new()))
        .expect_err("missing file");
    assert!(matches!(err, VitalityError::RecommendationError(_)));
}
