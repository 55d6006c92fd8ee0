#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use tempfile::TempDir;
use vitality_core::domain::ProfileData;
use vitality_core::errors::{Result, VitalityError};
use vitality_core::storage::{JsonProfileStore, ProfileStore};
use vitality_core::wizard::{
    ActionContext, ChecklistContext, ChecklistResponse, FormInteraction, NavAction, Notice,
    NoticeKind, PromptContext, PromptResponse,
};

/// Scripted stand-in for the terminal. Queues drain in order; an empty
/// prompt queue keeps every value and an empty action queue cancels.
#[derive(Default)]
pub struct MockInteraction {
    pub prompts: VecDeque<PromptResponse>,
    pub toggles: VecDeque<ChecklistResponse>,
    pub actions: VecDeque<NavAction>,
    pub prompted: Vec<String>,
    pub shown: Vec<(String, Vec<String>)>,
    pub notices: Vec<Notice>,
    pub menus: Vec<MenuSnapshot>,
}

/// What the navigation menu looked like when an action was chosen.
#[derive(Debug, Clone)]
pub struct MenuSnapshot {
    pub step_index: usize,
    pub progress: u8,
    pub accuracy: Option<String>,
    pub generate_enabled: Option<bool>,
    pub completed: Vec<&'static str>,
}

impl MockInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prompts(mut self, prompts: impl IntoIterator<Item = PromptResponse>) -> Self {
        self.prompts.extend(prompts);
        self
    }

    pub fn with_toggles(mut self, toggles: impl IntoIterator<Item = ChecklistResponse>) -> Self {
        self.toggles.extend(toggles);
        self
    }

    pub fn with_actions(mut self, actions: impl IntoIterator<Item = NavAction>) -> Self {
        self.actions.extend(actions);
        self
    }

    pub fn errors(&self) -> Vec<&str> {
        self.notices
            .iter()
            .filter(|notice| notice.kind == NoticeKind::Error)
            .map(|notice| notice.message.as_str())
            .collect()
    }
}

pub fn value(raw: &str) -> PromptResponse {
    PromptResponse::Value(raw.to_string())
}

impl FormInteraction for MockInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        self.prompted.push(context.label.to_string());
        self.prompts.pop_front().unwrap_or(PromptResponse::Keep)
    }

    fn prompt_checklist(&mut self, context: &ChecklistContext<'_>) -> ChecklistResponse {
        self.prompted.push(context.label.to_string());
        self.toggles.pop_front().unwrap_or(ChecklistResponse::Done)
    }

    fn choose_action(&mut self, context: &ActionContext<'_>) -> NavAction {
        self.menus.push(MenuSnapshot {
            step_index: context.step.index,
            progress: context.progress,
            accuracy: context.accuracy.clone(),
            generate_enabled: context.generate.as_ref().map(|option| option.enabled),
            completed: context
                .sections
                .iter()
                .filter(|status| status.completed)
                .map(|status| status.label)
                .collect(),
        });
        self.actions.pop_front().unwrap_or(NavAction::Cancel)
    }

    fn show(&mut self, title: &str, lines: &[String]) {
        self.shown.push((title.to_string(), lines.to_vec()));
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// In-memory store that can be told to fail every save.
#[derive(Default)]
pub struct MemoryStore {
    pub profiles: RefCell<HashMap<String, ProfileData>>,
    pub fail_saves: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self, id: &str) -> Result<Option<ProfileData>> {
        Ok(self.profiles.borrow().get(id).cloned())
    }

    fn save(&self, id: &str, profile: &ProfileData) -> Result<()> {
        if self.fail_saves {
            return Err(VitalityError::StorageError("disk full".into()));
        }
        self.profiles
            .borrow_mut()
            .insert(id.to_string(), profile.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut ids: Vec<String> = self.profiles.borrow().keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

/// JSON store rooted in a fresh temporary directory. Keep the guard alive
/// for as long as the store is used.
pub fn temp_store() -> (TempDir, JsonProfileStore) {
    let temp = TempDir::new().expect("create temp dir");
    let store =
        JsonProfileStore::new(Some(temp.path().to_path_buf())).expect("create json profile store");
    (temp, store)
}
