//! Recommendation generation behind an opaque collaborator.
//!
//! The core never inspects what the generator says; it only tracks whether
//! a request is running, finished, or failed.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::recommendation::{PromptKind, RecommendationPrompt, StructuredRecommendation};
use crate::errors::{Result, VitalityError};

pub trait RecommendationGenerator {
    fn generate(&self, prompt: &RecommendationPrompt) -> Result<StructuredRecommendation>;
}

/// What the front end shows for the recommendation panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RecommendationState {
    #[default]
    Idle,
    Loading,
    Ready(StructuredRecommendation),
    Failed(String),
}

impl RecommendationState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RecommendationState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RecommendationState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn recommendation(&self) -> Option<&StructuredRecommendation> {
        match self {
            RecommendationState::Ready(recommendation) => Some(recommendation),
            _ => None,
        }
    }
}

/// Tracks a single recommendation request at a time.
///
/// A second request while one is loading is refused with
/// [`VitalityError::RequestInFlight`] instead of being issued twice.
#[derive(Debug, Default)]
pub struct RecommendationSession {
    state: RecommendationState,
}

impl RecommendationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RecommendationState {
        &self.state
    }

    pub fn begin(&mut self) -> Result<()> {
        if self.state.is_loading() {
            return Err(VitalityError::RequestInFlight);
        }
        self.state = RecommendationState::Loading;
        Ok(())
    }

    /// Records the outcome. The previous result is replaced either way.
    pub fn finish(&mut self, outcome: &Result<StructuredRecommendation>) -> &RecommendationState {
        self.state = match outcome {
            Ok(recommendation) => RecommendationState::Ready(recommendation.clone()),
            Err(err) => {
                warn!(error = %err, "recommendation request failed");
                RecommendationState::Failed(err.to_string())
            }
        };
        &self.state
    }

    pub fn request(
        &mut self,
        generator: &dyn RecommendationGenerator,
        prompt: &RecommendationPrompt,
    ) -> Result<StructuredRecommendation> {
        self.begin()?;
        info!(kind = ?prompt.kind, "requesting recommendations");
        let outcome = generator.generate(prompt);
        self.finish(&outcome);
        outcome
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CannedResponses {
    ByKind(BTreeMap<PromptKind, StructuredRecommendation>),
    Single(StructuredRecommendation),
}

/// Serves canned responses from a JSON file.
///
/// The file holds either one response object, or an object keyed by prompt
/// kind (`health_profile`, `biological_age`).
#[derive(Debug, Clone)]
pub struct FileRecommendationSource {
    path: PathBuf,
}

impl FileRecommendationSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<CannedResponses> {
        let data = fs::read_to_string(&self.path).map_err(|err| {
            VitalityError::RecommendationError(format!(
                "cannot read `{}`: {}",
                self.path.display(),
                err
            ))
        })?;
        serde_json::from_str(&data).map_err(|err| {
            VitalityError::RecommendationError(format!(
                "malformed response in `{}`: {}",
                self.path.display(),
                err
            ))
        })
    }
}

impl RecommendationGenerator for FileRecommendationSource {
    fn generate(&self, prompt: &RecommendationPrompt) -> Result<StructuredRecommendation> {
        match self.read()? {
            CannedResponses::Single(response) => Ok(response),
            CannedResponses::ByKind(mut responses) => {
                responses.remove(&prompt.kind).ok_or_else(|| {
                    VitalityError::RecommendationError(format!(
                        "no response for {:?} in `{}`",
                        prompt.kind,
                        self.path.display()
                    ))
                })
            }
        }
    }
}
