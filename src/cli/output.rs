//! Styled terminal lines for commands and the form interaction.

use colored::Colorize;
use std::fmt;

use crate::wizard::{Notice, NoticeKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
    Detail,
}

impl MessageKind {
    fn tag(self) -> Option<&'static str> {
        match self {
            MessageKind::Info => Some("[i]"),
            MessageKind::Success => Some("[ok]"),
            MessageKind::Warning => Some("[!]"),
            MessageKind::Error => Some("[x]"),
            MessageKind::Section | MessageKind::Detail => None,
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, MessageKind::Error)
    }
}

impl From<NoticeKind> for MessageKind {
    fn from(kind: NoticeKind) -> Self {
        match kind {
            NoticeKind::Info => MessageKind::Info,
            NoticeKind::Success => MessageKind::Success,
            NoticeKind::Warning => MessageKind::Warning,
            NoticeKind::Error => MessageKind::Error,
        }
    }
}

/// The line as it will be printed, colours included when enabled.
pub fn render(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    let plain = match (kind, kind.tag()) {
        (MessageKind::Section, _) => format!("-- {} --", text.trim()),
        (MessageKind::Detail, _) => format!("   {text}"),
        (_, Some(tag)) => format!("{tag} {text}"),
        (_, None) => text,
    };

    match kind {
        MessageKind::Success => plain.green().to_string(),
        MessageKind::Warning => plain.yellow().to_string(),
        MessageKind::Error => plain.red().bold().to_string(),
        MessageKind::Section => plain.cyan().bold().to_string(),
        MessageKind::Detail => plain.dimmed().to_string(),
        MessageKind::Info => plain,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let rendered = render(kind, message);
    if kind.to_stderr() {
        eprintln!("{rendered}");
    } else if kind == MessageKind::Section {
        println!("\n{rendered}");
    } else {
        println!("{rendered}");
    }
}

pub fn notice(notice: Notice) {
    print(notice.kind.into(), notice.message);
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

pub fn detail(message: impl fmt::Display) {
    print(MessageKind::Detail, message);
}

pub fn line(message: impl fmt::Display) {
    println!("{message}");
}

/// Fixed-width text progress bar, e.g. `[#####-----]  50%`.
pub fn progress_bar(percent: u8, width: usize) -> String {
    let percent = percent.min(100) as usize;
    let filled = (percent * width + 50) / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        percent
    )
}
