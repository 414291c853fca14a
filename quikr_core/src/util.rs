//! Fixed widget texts.

/// Text of the bot entry appended when the webhook call fails.
pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error. Please try again.";

/// Reply text used when the webhook payload carries neither `output` nor `text`.
pub const DEFAULT_REPLY_TEXT: &str = "Received";

/// Greeting shown above the transcript. It is never part of the transcript.
pub const DEFAULT_WELCOME_MESSAGE: &str = "Welcome to Transcend! I'm your Theater Assistant. How can I help you create the ultimate cinematic experience at home?";

pub const DEFAULT_TITLE: &str = "Transcend Assistant";

pub const DEFAULT_SUBTITLE: &str = "Home Theater • Automation • Audio Help";

pub const DEFAULT_INPUT_PLACEHOLDER: &str = "How can we help you?";

/// Prompts offered as chips before the first message is sent.
pub const DEFAULT_STARTER_PROMPTS: [&str; 4] = [
    "Home Theater Estimate",
    "Automation Setup",
    "Audio Calibration",
    "Free Walkthrough",
];

/// Whitespace as the widget treats it: Unicode `White_Space` without
/// U+0085, plus the byte order mark U+FEFF.
#[must_use]
pub fn is_space(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{85}')
}

/// `text` with leading and trailing [`is_space`] characters removed.
#[must_use]
pub fn trim_space(text: &str) -> &str {
    text.trim_matches(is_space)
}

/// Whether `text` has anything besides whitespace.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    trim_space(text).is_empty()
}
