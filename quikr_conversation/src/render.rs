//! Plain-text rendering of the widget for terminals.

use quikr_core::{ChatEntry, Sender};
use std::fmt::Write;

use crate::controller::{WidgetSnapshot, WidgetTab};
use crate::settings::WidgetSettings;

pub const TYPING_INDICATOR: &str = "Bot: ...";

const ERROR_MARKER: &str = "(!)";

#[must_use]
pub fn render_header(settings: &WidgetSettings) -> String {
    let rule = "=".repeat(settings.title.chars().count().max(settings.subtitle.chars().count()));
    format!("{rule}\n{}\n{}\n{rule}", settings.title, settings.subtitle)
}

/// One transcript entry. Multi-line texts are indented under the sender.
#[must_use]
pub fn render_entry(entry: &ChatEntry) -> String {
    let label = match entry.sender {
        Sender::User => "You",
        Sender::Bot => "Bot",
    };
    let marker = if entry.error {
        format!(" {ERROR_MARKER}")
    } else {
        String::new()
    };

    let mut lines = entry.text.lines();
    let mut out = format!("{label}:{marker} {}", lines.next().unwrap_or_default());
    for line in lines {
        let _ = write!(out, "\n     {line}");
    }
    out
}

/// Numbered chips, 1-based, as typed by the user to pick one.
#[must_use]
pub fn render_chips(options: &[String]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| format!("[{}] {option}", i + 1))
        .collect::<Vec<_>>()
        .join("  ")
}

/// The whole panel: header, welcome message, then either the starter
/// prompts or the transcript with its live chips.
#[must_use]
pub fn render_view(snapshot: &WidgetSnapshot, settings: &WidgetSettings) -> String {
    if !snapshot.view.open {
        return format!("[{}] closed. Type /open to start.", settings.title);
    }

    let mut out = render_header(settings);
    let _ = write!(out, "\nBot: {}", settings.welcome_message);

    match snapshot.view.tab {
        WidgetTab::Home => {
            if !settings.starter_prompts.is_empty() {
                let _ = write!(out, "\n\n{}", render_chips(&settings.starter_prompts));
            }
        }
        WidgetTab::Chat => {
            for entry in &snapshot.entries {
                let _ = write!(out, "\n\n{}", render_entry(entry));
            }
            let options = snapshot.live_options();
            if !options.is_empty() {
                let _ = write!(out, "\n\n{}", render_chips(options));
            }
            if snapshot.loading {
                let _ = write!(out, "\n\n{TYPING_INDICATOR}");
            }
        }
    }

    out
}
