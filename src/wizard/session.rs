//! One open form: the shared profile, its navigator, and the collaborators'
//! state for this session only.

use tracing::{debug, info};

use crate::domain::biomarker::BiomarkerCatalog;
use crate::domain::profile::{ProfileData, ProfileUpdate};
use crate::domain::recommendation::{PromptKind, RecommendationPrompt, StructuredRecommendation};
use crate::errors::{Result, VitalityError};
use crate::recommendation::{RecommendationGenerator, RecommendationSession, RecommendationState};
use crate::storage::ProfileStore;

use super::dispatch::{RenderDispatcher, RenderOutcome};
use super::flows::FlowConfig;
use super::interaction::{FormInteraction, GenerateOption, SectionStatus, StepPosition};
use super::navigator::NavigatorState;
use super::progress::progress;

pub struct FormSession {
    flow: FlowConfig,
    catalog: BiomarkerCatalog,
    data: ProfileData,
    nav: NavigatorState,
    recommendations: RecommendationSession,
    dirty: bool,
}

impl FormSession {
    /// Starts at the first section. Threshold sections already satisfied by
    /// hydrated data are marked complete straight away.
    pub fn new(flow: FlowConfig, catalog: BiomarkerCatalog, data: ProfileData) -> Self {
        let mut nav = NavigatorState::new(&flow.registry);
        nav.refresh_completion(&data, &flow.registry);
        Self {
            flow,
            catalog,
            data,
            nav,
            recommendations: RecommendationSession::new(),
            dirty: false,
        }
    }

    /// Hydrates from `store`, or starts empty when nothing is stored yet.
    pub fn open(
        flow: FlowConfig,
        catalog: BiomarkerCatalog,
        store: &dyn ProfileStore,
        id: &str,
    ) -> Result<Self> {
        let data = match store.load(id)? {
            Some(data) => {
                info!(profile = id, "profile loaded");
                data
            }
            None => {
                info!(profile = id, "starting new profile");
                ProfileData::new()
            }
        };
        Ok(Self::new(flow, catalog, data))
    }

    pub fn flow(&self) -> &FlowConfig {
        &self.flow
    }

    pub fn catalog(&self) -> &BiomarkerCatalog {
        &self.catalog
    }

    pub fn data(&self) -> &ProfileData {
        &self.data
    }

    pub fn navigator(&self) -> &NavigatorState {
        &self.nav
    }

    pub fn recommendation_state(&self) -> &RecommendationState {
        self.recommendations.state()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn step(&self) -> StepPosition {
        StepPosition {
            index: self.nav.current_index(),
            total: self.nav.len(),
        }
    }

    pub fn apply(&mut self, update: ProfileUpdate) {
        self.data.apply(update);
        self.dirty = true;
        self.refresh();
    }

    fn refresh(&mut self) {
        for id in self.nav.refresh_completion(&self.data, &self.flow.registry) {
            info!(flow = self.flow.name, section = id, "section complete");
        }
    }

    /// Renders the current section and folds its changes into the session.
    pub fn render(&mut self, interaction: &mut dyn FormInteraction, read_only: bool) -> RenderOutcome {
        let index = self.nav.current_index();
        let outcome = RenderDispatcher::new(&self.flow.registry, &self.catalog).render(
            index,
            &mut self.data,
            interaction,
            read_only,
        );
        if !outcome.changed.is_empty() {
            debug!(changed = outcome.changed.len(), "section produced updates");
            self.dirty = true;
        }
        self.refresh();
        outcome
    }

    pub fn next(&mut self) -> bool {
        self.nav.next()
    }

    pub fn previous(&mut self) -> bool {
        self.nav.previous()
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        self.nav.jump_to(index)
    }

    pub fn progress(&self) -> u8 {
        progress(&self.data, &self.nav, &self.flow.progress)
    }

    pub fn accuracy_line(&self) -> Option<String> {
        self.flow.accuracy_line(&self.data)
    }

    pub fn generate_option(&self) -> Option<GenerateOption> {
        self.flow.generate_option(&self.data, &self.nav)
    }

    pub fn can_generate(&self) -> bool {
        self.generate_option().is_some_and(|option| option.enabled)
    }

    pub fn section_statuses(&self) -> Vec<SectionStatus> {
        let current = self.nav.current_index();
        self.flow
            .registry
            .iter()
            .enumerate()
            .map(|(index, section)| SectionStatus {
                label: section.label,
                icon: section.icon,
                completed: self.nav.is_completed(section.id),
                current: index == current,
            })
            .collect()
    }

    /// Hands the profile to the store. On failure nothing changes: the data,
    /// the step and the unsaved flag all stay as they were.
    pub fn save(&mut self, store: &dyn ProfileStore, id: &str) -> Result<()> {
        store.save(id, &self.data)?;
        self.dirty = false;
        Ok(())
    }

    /// Requests recommendations for the current data. The profile itself is
    /// never modified by the outcome.
    pub fn generate(
        &mut self,
        generator: &dyn RecommendationGenerator,
    ) -> Result<StructuredRecommendation> {
        if !self.can_generate() {
            return Err(VitalityError::InvalidInput(match self.generate_option() {
                Some(option) => option
                    .hint
                    .unwrap_or_else(|| format!("{} is not available yet", option.label)),
                None => "nothing to generate at this step".to_string(),
            }));
        }
        let prompt = match self.flow.prompt_kind {
            PromptKind::HealthProfile => RecommendationPrompt::health_profile(&self.data),
            PromptKind::BiologicalAge => RecommendationPrompt::biological_age(&self.data),
        };
        self.recommendations.request(generator, &prompt)
    }

    pub fn into_data(self) -> ProfileData {
        self.data
    }
}
