//! The surface through which sections talk to a user.
//!
//! The terminal front end implements [`FormInteraction`] with dialoguer;
//! tests drive the same engine with scripted responses.

use std::fmt;

/// Zero-based position of the current section within its flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPosition {
    pub index: usize,
    pub total: usize,
}

impl StepPosition {
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.total
    }
}

impl fmt::Display for StepPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}", self.index + 1, self.total)
    }
}

/// Describes how a field prompt was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// User supplied raw text to be parsed by the field.
    Value(String),
    /// Keep the current value untouched.
    Keep,
    /// Remove the current value.
    Clear,
    /// Leave this section and return to the previous one.
    Back,
    /// Abort the whole form.
    Cancel,
    /// Request the field's help text.
    Help,
}

/// Answers for a checkbox group. Each toggle flips one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistResponse {
    Toggle(usize),
    Done,
    Back,
    Cancel,
}

/// Navigation chosen after a section has been rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Next,
    Previous,
    JumpTo(usize),
    Save,
    Generate,
    Finish,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient message, the terminal equivalent of a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

pub struct PromptContext<'a> {
    pub section: &'a str,
    pub label: &'a str,
    pub current: Option<String>,
    pub help: Option<&'a str>,
    /// Present for single-choice fields.
    pub options: Option<Vec<String>>,
    pub step: StepPosition,
}

pub struct ChecklistContext<'a> {
    pub section: &'a str,
    pub label: &'a str,
    pub options: &'a [(&'a str, bool)],
    pub step: StepPosition,
}

/// One row of the section overview shown with the navigation menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionStatus {
    pub label: &'static str,
    pub icon: &'static str,
    pub completed: bool,
    pub current: bool,
}

pub struct ActionContext<'a> {
    pub flow: &'a str,
    pub step: StepPosition,
    pub sections: Vec<SectionStatus>,
    pub progress: u8,
    pub accuracy: Option<String>,
    pub can_next: bool,
    pub can_previous: bool,
    /// `None` when the flow offers no generate action at this step.
    pub generate: Option<GenerateOption>,
    pub has_store: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOption {
    pub label: &'static str,
    pub enabled: bool,
    pub hint: Option<String>,
}

pub trait FormInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse;

    fn prompt_checklist(&mut self, context: &ChecklistContext<'_>) -> ChecklistResponse;

    fn choose_action(&mut self, context: &ActionContext<'_>) -> NavAction;

    fn show(&mut self, title: &str, lines: &[String]);

    fn notify(&mut self, notice: Notice);
}
