/// A closed set of options presented as a single-choice field.
pub trait ChoiceOption: Copy + PartialEq + 'static {
    fn all() -> &'static [Self];

    fn label(&self) -> &'static str;

    /// Resolves either a 1-based index or a case-insensitive label.
    fn parse_choice(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Ok(index) = trimmed.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|idx| Self::all().get(idx))
                .copied();
        }
        Self::all()
            .iter()
            .find(|option| option.label().eq_ignore_ascii_case(trimmed))
            .copied()
    }

    fn labels() -> Vec<String> {
        Self::all()
            .iter()
            .map(|option| option.label().to_string())
            .collect()
    }
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
pub use uuid;
