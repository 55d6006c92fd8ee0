//! Terminal implementation of [`FormInteraction`] built on dialoguer.

use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::cli::output;
use crate::wizard::{
    ActionContext, ChecklistContext, ChecklistResponse, FormInteraction, NavAction, Notice,
    PromptContext, PromptResponse,
};

const BACK_TOKEN: &str = ":back";
const CANCEL_TOKEN: &str = ":cancel";
const CLEAR_TOKEN: &str = "-";
const HELP_TOKEN: &str = "?";

const KEEP_ITEM: &str = "« Keep current";
const CLEAR_ITEM: &str = "∅ Clear";
const BACK_ITEM: &str = "← Back";
const CANCEL_ITEM: &str = "✕ Cancel";
const DONE_ITEM: &str = "✓ Done";

/// Interactive implementation that relies on dialoguer prompts and the
/// shared output module.
pub struct TerminalInteraction {
    theme: ColorfulTheme,
    last_header: Option<String>,
}

impl TerminalInteraction {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            last_header: None,
        }
    }

    /// Prints the section header once per section, not once per field.
    fn header(&mut self, section: &str, step: impl std::fmt::Display) {
        let header = format!("{step} · {section}");
        if self.last_header.as_deref() == Some(header.as_str()) {
            return;
        }
        output::section(&header);
        output::detail(format!(
            "Enter keeps the current value · `{CLEAR_TOKEN}` clears · `{HELP_TOKEN}` help · `{BACK_TOKEN}` previous section · `{CANCEL_TOKEN}` abort"
        ));
        self.last_header = Some(header);
    }

    fn prompt_text(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        let prompt = match &context.current {
            Some(current) => format!("{} [{}]", context.label, current),
            None => context.label.to_string(),
        };
        let raw = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text();
        match raw {
            Ok(value) => parse_text_response(&value),
            Err(_) => PromptResponse::Cancel,
        }
    }

    fn prompt_choice(&mut self, context: &PromptContext<'_>, options: &[String]) -> PromptResponse {
        let mut items: Vec<String> = options.to_vec();
        let keep = items.len();
        items.push(KEEP_ITEM.into());
        let clear = items.len();
        items.push(CLEAR_ITEM.into());
        let back = items.len();
        items.push(BACK_ITEM.into());

        let default = context
            .current
            .as_deref()
            .and_then(|current| options.iter().position(|option| option == current))
            .unwrap_or(keep);
        let selection = Select::with_theme(&self.theme)
            .with_prompt(context.label)
            .items(&items)
            .default(default)
            .interact_opt();

        match selection {
            Ok(Some(index)) if index == keep => PromptResponse::Keep,
            Ok(Some(index)) if index == clear => PromptResponse::Clear,
            Ok(Some(index)) if index == back => PromptResponse::Back,
            Ok(Some(index)) => {
                if context.current.as_deref() == options.get(index).map(String::as_str) {
                    PromptResponse::Keep
                } else {
                    PromptResponse::Value((index + 1).to_string())
                }
            }
            Ok(None) | Err(_) => PromptResponse::Cancel,
        }
    }
}

impl Default for TerminalInteraction {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_text_response(raw: &str) -> PromptResponse {
    match raw.trim() {
        "" => PromptResponse::Keep,
        CLEAR_TOKEN => PromptResponse::Clear,
        HELP_TOKEN => PromptResponse::Help,
        BACK_TOKEN => PromptResponse::Back,
        CANCEL_TOKEN => PromptResponse::Cancel,
        other => PromptResponse::Value(other.to_string()),
    }
}

impl FormInteraction for TerminalInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        self.header(context.section, context.step);
        match &context.options {
            Some(options) => self.prompt_choice(context, options),
            None => self.prompt_text(context),
        }
    }

    fn prompt_checklist(&mut self, context: &ChecklistContext<'_>) -> ChecklistResponse {
        self.header(context.section, context.step);
        let mut items: Vec<String> = context
            .options
            .iter()
            .map(|(label, checked)| format!("[{}] {}", if *checked { "x" } else { " " }, label))
            .collect();
        let done = items.len();
        items.push(DONE_ITEM.into());
        let back = items.len();
        items.push(BACK_ITEM.into());

        let selection = Select::with_theme(&self.theme)
            .with_prompt(format!("{} (select to toggle)", context.label))
            .items(&items)
            .default(done)
            .interact_opt();
        match selection {
            Ok(Some(index)) if index == done => ChecklistResponse::Done,
            Ok(Some(index)) if index == back => ChecklistResponse::Back,
            Ok(Some(index)) => ChecklistResponse::Toggle(index),
            Ok(None) | Err(_) => ChecklistResponse::Cancel,
        }
    }

    fn choose_action(&mut self, context: &ActionContext<'_>) -> NavAction {
        self.last_header = None;
        output::section(format!("{} · {}", context.flow, context.step));
        output::line(output::progress_bar(context.progress, 30));
        if let Some(accuracy) = &context.accuracy {
            output::detail(accuracy);
        }
        for status in &context.sections {
            let marker = match (status.current, status.completed) {
                (true, _) => "▶",
                (false, true) => "✓",
                (false, false) => "·",
            };
            output::detail(format!("{marker} {}", status.label));
        }

        let mut actions: Vec<(String, NavAction)> = Vec::new();
        if context.can_next {
            actions.push(("Next section →".into(), NavAction::Next));
        }
        if context.can_previous {
            actions.push(("← Previous section".into(), NavAction::Previous));
        }
        actions.push(("Jump to section…".into(), NavAction::JumpTo(context.step.index)));
        if context.has_store {
            actions.push(("Save progress".into(), NavAction::Save));
        }
        if let Some(generate) = &context.generate {
            if generate.enabled {
                actions.push((generate.label.to_string(), NavAction::Generate));
            } else if let Some(hint) = &generate.hint {
                output::detail(format!("{} unavailable: {}", generate.label, hint));
            }
        }
        actions.push(("Finish".into(), NavAction::Finish));
        actions.push((CANCEL_ITEM.into(), NavAction::Cancel));

        let labels: Vec<&str> = actions.iter().map(|(label, _)| label.as_str()).collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact_opt();
        let action = match selection {
            Ok(Some(index)) => actions.get(index).map(|(_, action)| *action),
            Ok(None) | Err(_) => None,
        };

        match action {
            Some(NavAction::JumpTo(_)) => {
                let sections: Vec<&str> = context.sections.iter().map(|s| s.label).collect();
                match Select::with_theme(&self.theme)
                    .with_prompt("Jump to")
                    .items(&sections)
                    .default(context.step.index)
                    .interact_opt()
                {
                    Ok(Some(index)) => NavAction::JumpTo(index),
                    _ => NavAction::JumpTo(context.step.index),
                }
            }
            Some(action) => action,
            None => NavAction::Cancel,
        }
    }

    fn show(&mut self, title: &str, lines: &[String]) {
        output::section(title);
        for line in lines {
            output::line(line);
        }
    }

    fn notify(&mut self, notice: Notice) {
        output::notice(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_tokens_map_to_responses() {
        assert_eq!(parse_text_response("  "), PromptResponse::Keep);
        assert_eq!(parse_text_response("-"), PromptResponse::Clear);
        assert_eq!(parse_text_response("?"), PromptResponse::Help);
        assert_eq!(parse_text_response(":back"), PromptResponse::Back);
        assert_eq!(parse_text_response(":cancel"), PromptResponse::Cancel);
        assert_eq!(
            parse_text_response(" 72.5 "),
            PromptResponse::Value("72.5".into())
        );
    }
}
