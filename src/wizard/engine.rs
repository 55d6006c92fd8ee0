use tracing::{info, warn};

use crate::domain::profile::ProfileData;
use crate::recommendation::RecommendationGenerator;
use crate::storage::ProfileStore;

use super::dispatch::RenderInterrupt;
use super::interaction::{ActionContext, FormInteraction, NavAction, Notice};
use super::session::FormSession;

/// High-level lifecycle states emitted by the form runner.
#[derive(Debug, Clone, PartialEq)]
pub enum FormResult<T> {
    Completed(T),
    Cancelled,
}

/// Drives a [`FormSession`] through a [`FormInteraction`]: render, merge,
/// recompute, then apply the chosen navigation action.
///
/// Collaborator failures are reported through [`FormInteraction::notify`]
/// and never end the loop.
pub struct FormEngine<'a> {
    store: Option<(&'a dyn ProfileStore, &'a str)>,
    generator: Option<&'a dyn RecommendationGenerator>,
    read_only: bool,
}

impl<'a> FormEngine<'a> {
    pub fn new() -> Self {
        Self {
            store: None,
            generator: None,
            read_only: false,
        }
    }

    pub fn with_store(mut self, store: &'a dyn ProfileStore, profile_id: &'a str) -> Self {
        self.store = Some((store, profile_id));
        self
    }

    pub fn with_generator(mut self, generator: &'a dyn RecommendationGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn run(
        &self,
        mut session: FormSession,
        interaction: &mut dyn FormInteraction,
    ) -> FormResult<ProfileData> {
        info!(flow = session.flow().name, sections = session.navigator().len(), "form opened");
        let mut render = true;

        loop {
            if render {
                let outcome = session.render(interaction, self.read_only);
                match outcome.interrupt {
                    Some(RenderInterrupt::Cancel) => return self.cancelled(&session),
                    Some(RenderInterrupt::Back) if session.previous() => continue,
                    _ => {}
                }
            }

            let action = {
                let context = ActionContext {
                    flow: session.flow().name,
                    step: session.step(),
                    sections: session.section_statuses(),
                    progress: session.progress(),
                    accuracy: session.accuracy_line(),
                    can_next: session.navigator().can_go_next(),
                    can_previous: session.navigator().can_go_previous(),
                    generate: session.generate_option(),
                    has_store: self.store.is_some() && !self.read_only,
                };
                interaction.choose_action(&context)
            };

            render = match action {
                NavAction::Next => session.next(),
                NavAction::Previous => session.previous(),
                NavAction::JumpTo(index) => session.jump_to(index),
                NavAction::Save => {
                    self.save(&mut session, interaction);
                    false
                }
                NavAction::Generate => {
                    self.generate(&mut session, interaction);
                    false
                }
                NavAction::Finish => {
                    let must_save = session.is_dirty() && self.store.is_some() && !self.read_only;
                    if must_save && !self.save(&mut session, interaction) {
                        false
                    } else {
                        info!(flow = session.flow().name, "form completed");
                        return FormResult::Completed(session.into_data());
                    }
                }
                NavAction::Cancel => return self.cancelled(&session),
            };
        }
    }

    fn cancelled(&self, session: &FormSession) -> FormResult<ProfileData> {
        if session.is_dirty() {
            warn!(flow = session.flow().name, "form cancelled with unsaved changes");
        } else {
            info!(flow = session.flow().name, "form cancelled");
        }
        FormResult::Cancelled
    }

    /// Returns whether the profile is now persisted.
    fn save(&self, session: &mut FormSession, interaction: &mut dyn FormInteraction) -> bool {
        let Some((store, id)) = self.store else {
            interaction.notify(Notice::warning("No profile store configured; nothing saved."));
            return false;
        };
        match session.save(store, id) {
            Ok(()) => {
                interaction.notify(Notice::success(format!("Profile `{id}` saved.")));
                true
            }
            Err(err) => {
                warn!(profile = id, error = %err, "save failed");
                interaction.notify(Notice::error(format!("Could not save profile: {err}")));
                false
            }
        }
    }

    fn generate(&self, session: &mut FormSession, interaction: &mut dyn FormInteraction) {
        let Some(generator) = self.generator else {
            interaction.notify(Notice::warning("No recommendation source configured."));
            return;
        };
        match session.generate(generator) {
            Ok(recommendation) => {
                let title = session
                    .generate_option()
                    .map(|option| option.label)
                    .unwrap_or("Recommendations");
                interaction.show(title, &recommendation.lines());
            }
            Err(err) => interaction.notify(Notice::error(err.to_string())),
        }
    }
}

impl Default for FormEngine<'_> {
    fn default() -> Self {
        Self::new()
    }
}
