//! Renders the current section and merges what it reports back.

use std::fmt::Display;

use tracing::debug;

use crate::domain::biomarker::{parse_lab_value, BiomarkerCatalog, BiomarkerDefinition};
use crate::domain::common::ChoiceOption;
use crate::domain::profile::{toggle_item, ProfileData, ProfileField, ProfileUpdate};

use super::interaction::{
    ChecklistContext, ChecklistResponse, FormInteraction, Notice, PromptContext, PromptResponse,
    StepPosition,
};
use super::registry::{SectionDescriptor, SectionRegistry};

/// Navigation requested from inside a section, ending its render early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderInterrupt {
    Back,
    Cancel,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    pub changed: Vec<ProfileField>,
    pub interrupt: Option<RenderInterrupt>,
}

/// Everything a section's render function may touch.
///
/// [`RenderContext::on_change`] merges immediately, so later fields in the
/// same section observe earlier edits.
pub struct RenderContext<'a> {
    data: &'a mut ProfileData,
    interaction: &'a mut dyn FormInteraction,
    catalog: &'a BiomarkerCatalog,
    section: &'a SectionDescriptor,
    step: StepPosition,
    read_only: bool,
    outcome: RenderOutcome,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        data: &'a mut ProfileData,
        interaction: &'a mut dyn FormInteraction,
        catalog: &'a BiomarkerCatalog,
        section: &'a SectionDescriptor,
        step: StepPosition,
        read_only: bool,
    ) -> Self {
        Self {
            data,
            interaction,
            catalog,
            section,
            step,
            read_only,
            outcome: RenderOutcome::default(),
        }
    }

    pub fn data(&self) -> &ProfileData {
        self.data
    }

    pub fn catalog(&self) -> &'a BiomarkerCatalog {
        self.catalog
    }

    pub fn section(&self) -> &'a SectionDescriptor {
        self.section
    }

    pub fn step(&self) -> StepPosition {
        self.step
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    pub fn interrupted(&self) -> bool {
        self.outcome.interrupt.is_some()
    }

    /// Shallow-merges `update` into the shared profile. No validation
    /// happens here; whatever the section hands over is stored.
    pub fn on_change(&mut self, update: ProfileUpdate) {
        let field = update.field();
        debug!(section = self.section.id, field = ?field, "merging update");
        self.data.apply(update);
        if !self.outcome.changed.contains(&field) {
            self.outcome.changed.push(field);
        }
    }

    pub fn request(&mut self, interrupt: RenderInterrupt) {
        self.outcome.interrupt.get_or_insert(interrupt);
    }

    pub fn show(&mut self, title: &str, lines: &[String]) {
        if self.interrupted() {
            return;
        }
        self.interaction.show(title, lines);
    }

    pub fn notify(&mut self, notice: Notice) {
        self.interaction.notify(notice);
    }

    pub(crate) fn finish(self) -> RenderOutcome {
        self.outcome
    }

    /// Prompts a free-text field and parses the answer with `parse`.
    ///
    /// Unparseable input is dropped without touching the profile.
    pub fn field<T, P, M>(
        &mut self,
        label: &str,
        current: Option<T>,
        help: Option<&str>,
        parse: P,
        make: M,
    ) where
        T: Display,
        P: Fn(&str) -> Option<T>,
        M: Fn(Option<T>) -> ProfileUpdate,
    {
        let current = current.map(|value| value.to_string());
        let Some(raw) = self.ask(label, current, help, None) else {
            return;
        };
        match raw {
            Answer::Clear => self.on_change(make(None)),
            Answer::Text(text) => match parse(&text) {
                Some(value) => self.on_change(make(Some(value))),
                None => debug!(field = label, input = %text, "unparseable input skipped"),
            },
        }
    }

    pub fn choice<C, M>(&mut self, label: &str, current: Option<C>, make: M)
    where
        C: ChoiceOption,
        M: Fn(Option<C>) -> ProfileUpdate,
    {
        let current = current.map(|value| value.label().to_string());
        let Some(raw) = self.ask(label, current, None, Some(C::labels())) else {
            return;
        };
        match raw {
            Answer::Clear => self.on_change(make(None)),
            Answer::Text(text) => match C::parse_choice(&text) {
                Some(value) => self.on_change(make(Some(value))),
                None => debug!(field = label, input = %text, "unknown option skipped"),
            },
        }
    }

    pub fn yes_no<M>(&mut self, label: &str, current: Option<bool>, make: M)
    where
        M: Fn(Option<bool>) -> ProfileUpdate,
    {
        let current = current.map(|value| if value { "Yes" } else { "No" }.to_string());
        let options = vec!["Yes".to_string(), "No".to_string()];
        let Some(raw) = self.ask(label, current, None, Some(options)) else {
            return;
        };
        match raw {
            Answer::Clear => self.on_change(make(None)),
            Answer::Text(text) => match parse_bool(&text) {
                Some(value) => self.on_change(make(Some(value))),
                None => debug!(field = label, input = %text, "unparseable input skipped"),
            },
        }
    }

    /// Checkbox group: every toggle is a read-modify-write of the full list.
    pub fn checklist<R, M>(&mut self, label: &str, options: &[&str], read: R, make: M)
    where
        R: Fn(&ProfileData) -> &Vec<String>,
        M: Fn(Vec<String>) -> ProfileUpdate,
    {
        if self.interrupted() {
            return;
        }
        if self.read_only {
            let lines = vec![display_list(read(self.data))];
            self.interaction.show(label, &lines);
            return;
        }
        loop {
            let selected = read(self.data);
            let states: Vec<(&str, bool)> = options
                .iter()
                .map(|option| (*option, selected.iter().any(|item| item == option)))
                .collect();
            let response = self.interaction.prompt_checklist(&ChecklistContext {
                section: self.section.label,
                label,
                options: &states,
                step: self.step,
            });
            match response {
                ChecklistResponse::Toggle(index) => {
                    let Some(option) = options.get(index) else {
                        continue;
                    };
                    let next = toggle_item(read(self.data), option);
                    self.on_change(make(next));
                }
                ChecklistResponse::Done => return,
                ChecklistResponse::Back => {
                    self.request(RenderInterrupt::Back);
                    return;
                }
                ChecklistResponse::Cancel => {
                    self.request(RenderInterrupt::Cancel);
                    return;
                }
            }
        }
    }

    /// Comma-separated free list, replaced wholesale on every answer.
    pub fn free_list<R, M>(&mut self, label: &str, read: R, make: M)
    where
        R: Fn(&ProfileData) -> &Vec<String>,
        M: Fn(Vec<String>) -> ProfileUpdate,
    {
        let items = read(self.data);
        let current = if items.is_empty() {
            None
        } else {
            Some(items.join(", "))
        };
        let help = "Separate entries with commas.";
        let Some(raw) = self.ask(label, current, Some(help), None) else {
            return;
        };
        let next = match raw {
            Answer::Clear => Vec::new(),
            Answer::Text(text) => split_list(&text),
        };
        self.on_change(make(next));
    }

    /// Lab value for one biomarker, merged by rewriting the whole map.
    pub fn lab_value(&mut self, definition: &BiomarkerDefinition) {
        let current = self.data.lab_results.get(definition.id).copied();
        let label = definition.prompt_label();
        let Some(raw) = self.ask(&label, current.map(|v| v.to_string()), None, None) else {
            return;
        };
        let mut next = self.data.lab_results.clone();
        match raw {
            Answer::Clear => {
                next.remove(definition.id);
            }
            Answer::Text(text) => match parse_lab_value(&text) {
                Some(value) => {
                    next.insert(definition.id.to_string(), value);
                }
                None => {
                    debug!(marker = definition.id, input = %text, "invalid lab value skipped");
                    return;
                }
            },
        }
        self.on_change(ProfileUpdate::LabResults(next));
    }

    /// Shared prompt loop. `None` means: nothing to merge.
    fn ask(
        &mut self,
        label: &str,
        current: Option<String>,
        help: Option<&str>,
        options: Option<Vec<String>>,
    ) -> Option<Answer> {
        if self.interrupted() {
            return None;
        }
        if self.read_only {
            let value = current.unwrap_or_else(|| "[not set]".to_string());
            self.interaction.show(label, &[value]);
            return None;
        }
        loop {
            let context = PromptContext {
                section: self.section.label,
                label,
                current: current.clone(),
                help,
                options: options.clone(),
                step: self.step,
            };
            match self.interaction.prompt_field(&context) {
                PromptResponse::Value(text) if text.trim().is_empty() => return None,
                PromptResponse::Value(text) => return Some(Answer::Text(text)),
                PromptResponse::Keep => return None,
                PromptResponse::Clear => return Some(Answer::Clear),
                PromptResponse::Back => {
                    self.request(RenderInterrupt::Back);
                    return None;
                }
                PromptResponse::Cancel => {
                    self.request(RenderInterrupt::Cancel);
                    return None;
                }
                PromptResponse::Help => {
                    let text = help.unwrap_or("No additional information available for this field.");
                    self.interaction.notify(Notice::info(text));
                }
            }
        }
    }
}

enum Answer {
    Text(String),
    Clear,
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "2" | "0" => Some(false),
        _ => None,
    }
}

fn split_list(raw: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        if !items.iter().any(|existing| existing.eq_ignore_ascii_case(item)) {
            items.push(item.to_string());
        }
    }
    items
}

fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        "[none]".to_string()
    } else {
        items.join(", ")
    }
}

/// Resolves the current section and invokes its render function.
pub struct RenderDispatcher<'a> {
    registry: &'a SectionRegistry,
    catalog: &'a BiomarkerCatalog,
}

impl<'a> RenderDispatcher<'a> {
    pub fn new(registry: &'a SectionRegistry, catalog: &'a BiomarkerCatalog) -> Self {
        Self { registry, catalog }
    }

    /// # Panics
    ///
    /// Panics when `index` is outside the registry; navigator indices are
    /// clamped so this cannot happen through the engine.
    pub fn render(
        &self,
        index: usize,
        data: &mut ProfileData,
        interaction: &mut dyn FormInteraction,
        read_only: bool,
    ) -> RenderOutcome {
        let section = self
            .registry
            .get(index)
            .unwrap_or_else(|| panic!("no section at index {index}"));
        let step = StepPosition {
            index,
            total: self.registry.len(),
        };
        let mut context = RenderContext::new(data, interaction, self.catalog, section, step, read_only);
        (section.render)(&mut context);
        context.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::ActivityLevel;
    use crate::wizard::interaction::{ActionContext, NavAction};
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Scripted {
        prompts: VecDeque<PromptResponse>,
        toggles: VecDeque<ChecklistResponse>,
        shown: Vec<(String, Vec<String>)>,
        notices: Vec<Notice>,
    }

    impl FormInteraction for Scripted {
        fn prompt_field(&mut self, _context: &PromptContext<'_>) -> PromptResponse {
            self.prompts.pop_front().unwrap_or(PromptResponse::Keep)
        }

        fn prompt_checklist(&mut self, _context: &ChecklistContext<'_>) -> ChecklistResponse {
            self.toggles.pop_front().unwrap_or(ChecklistResponse::Done)
        }

        fn choose_action(&mut self, _context: &ActionContext<'_>) -> NavAction {
            NavAction::Cancel
        }

        fn show(&mut self, title: &str, lines: &[String]) {
            self.shown.push((title.to_string(), lines.to_vec()));
        }

        fn notify(&mut self, notice: Notice) {
            self.notices.push(notice);
        }
    }

    fn basics(ctx: &mut RenderContext<'_>) {
        let age = ctx.data().age;
        ctx.field("Age", age, None, |raw| raw.trim().parse().ok(), ProfileUpdate::Age);
        let level = ctx.data().activity_level;
        ctx.choice("Activity", level, ProfileUpdate::ActivityLevel);
        ctx.checklist(
            "Goals",
            &["weight_loss", "energy_boost"],
            |data| &data.health_goals,
            ProfileUpdate::HealthGoals,
        );
    }

    fn registry() -> SectionRegistry {
        SectionRegistry::new(vec![SectionDescriptor::new("basics", "Basics", "", basics)])
    }

    #[test]
    fn merges_updates_from_rendered_section() {
        let registry = registry();
        let catalog = BiomarkerCatalog::standard();
        let dispatcher = RenderDispatcher::new(&registry, &catalog);
        let mut data = ProfileData::new();
        let mut interaction = Scripted {
            prompts: VecDeque::from([
                PromptResponse::Value("44".into()),
                PromptResponse::Value("3".into()),
            ]),
            toggles: VecDeque::from([
                ChecklistResponse::Toggle(0),
                ChecklistResponse::Toggle(1),
                ChecklistResponse::Toggle(0),
                ChecklistResponse::Done,
            ]),
            ..Default::default()
        };

        let outcome = dispatcher.render(0, &mut data, &mut interaction, false);
        assert_eq!(outcome.interrupt, None);
        assert_eq!(
            outcome.changed,
            vec![
                ProfileField::Age,
                ProfileField::ActivityLevel,
                ProfileField::HealthGoals
            ]
        );
        assert_eq!(data.age, Some(44));
        assert_eq!(data.activity_level, Some(ActivityLevel::Moderate));
        assert_eq!(data.health_goals, vec!["energy_boost".to_string()]);
    }

    #[test]
    fn invalid_input_is_skipped_silently() {
        let registry = registry();
        let catalog = BiomarkerCatalog::standard();
        let dispatcher = RenderDispatcher::new(&registry, &catalog);
        let mut data = ProfileData::new();
        data.age = Some(30);
        let mut interaction = Scripted {
            prompts: VecDeque::from([PromptResponse::Value("forty".into())]),
            ..Default::default()
        };

        let outcome = dispatcher.render(0, &mut data, &mut interaction, false);
        assert_eq!(data.age, Some(30));
        assert!(outcome.changed.is_empty());
        assert!(interaction.notices.is_empty());
    }

    #[test]
    fn back_interrupts_remaining_fields() {
        let registry = registry();
        let catalog = BiomarkerCatalog::standard();
        let dispatcher = RenderDispatcher::new(&registry, &catalog);
        let mut data = ProfileData::new();
        let mut interaction = Scripted {
            prompts: VecDeque::from([PromptResponse::Back, PromptResponse::Value("2".into())]),
            ..Default::default()
        };

        let outcome = dispatcher.render(0, &mut data, &mut interaction, false);
        assert_eq!(outcome.interrupt, Some(RenderInterrupt::Back));
        assert_eq!(data.activity_level, None);
        assert_eq!(interaction.prompts.len(), 1, "second prompt must not be asked");
    }

    #[test]
    fn read_only_shows_values_without_prompting() {
        let registry = registry();
        let catalog = BiomarkerCatalog::standard();
        let dispatcher = RenderDispatcher::new(&registry, &catalog);
        let mut data = ProfileData::new();
        data.age = Some(61);
        let mut interaction = Scripted {
            prompts: VecDeque::from([PromptResponse::Value("1".into())]),
            ..Default::default()
        };

        let before = data.clone();
        dispatcher.render(0, &mut data, &mut interaction, true);
        assert_eq!(data, before);
        assert_eq!(interaction.prompts.len(), 1);
        assert_eq!(interaction.shown[0], ("Age".to_string(), vec!["61".to_string()]));
        assert_eq!(interaction.shown[2].1, vec!["[none]".to_string()]);
    }

    #[test]
    fn help_reprompts_same_field() {
        let registry = registry();
        let catalog = BiomarkerCatalog::standard();
        let dispatcher = RenderDispatcher::new(&registry, &catalog);
        let mut data = ProfileData::new();
        let mut interaction = Scripted {
            prompts: VecDeque::from([PromptResponse::Help, PromptResponse::Value("52".into())]),
            ..Default::default()
        };

        dispatcher.render(0, &mut data, &mut interaction, false);
        assert_eq!(data.age, Some(52));
        assert_eq!(interaction.notices.len(), 1);
    }

    #[test]
    fn split_list_trims_and_dedupes() {
        assert_eq!(
            split_list(" metformin, Statin ,, statin "),
            vec!["metformin".to_string(), "Statin".to_string()]
        );
    }
}
