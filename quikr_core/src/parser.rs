//! Splits a raw bot reply into display text and quick-reply options.
//!
//! Bullet and numbered lines become options when they are short, every
//! other meaningful line stays in the body. The function is total: any
//! input string yields a [`ParsedResponse`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::util::trim_space;

/// Options must be strictly shorter than this many UTF-16 code units.
pub const MAX_OPTION_CHARS: usize = 50;

const BOLD_MARKER: &str = "**";

/// One of `-`, `*`, `•` or a digit, an optional `.`/`)`, then whitespace
/// in the sense of [`crate::util::is_space`].
#[allow(clippy::expect_used)]
static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-*•0-9][.)]?[[\s\x{FEFF}]&&[^\x{85}]]+").expect("bullet prefix pattern is valid")
});

/// Reply split into body text and detected options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResponse {
    pub text: String,
    pub options: Vec<String>,
}

impl ParsedResponse {
    #[must_use]
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}

/// Length in UTF-16 code units, so a surrogate pair counts twice.
fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Parse a raw reply.
///
/// Bullet lines whose remainder is [`MAX_OPTION_CHARS`] code units or longer
/// are dropped from both the body and the options. When no body line
/// survives, the whole bold-stripped reply is used as the text.
#[must_use]
pub fn parse_response(raw: &str) -> ParsedResponse {
    let cleaned = raw.replace(BOLD_MARKER, "");

    let mut body: Vec<&str> = Vec::new();
    let mut options = Vec::new();

    for line in cleaned.split('\n') {
        let line = trim_space(line);
        if let Some(prefix) = BULLET_PREFIX.find(line) {
            let option = trim_space(&line[prefix.end()..]);
            if text_len(option) < MAX_OPTION_CHARS {
                options.push(option.to_string());
            }
        } else if text_len(line) > 1 {
            body.push(line);
        }
    }

    let joined = body.join("\n");
    let joined = trim_space(&joined);
    let text = if joined.is_empty() {
        cleaned.clone()
    } else {
        joined.to_string()
    };

    ParsedResponse { text, options }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_short_bullets_and_drops_long_ones() {
        let parsed = parse_response(
            "Here are options:\n- Estimate\n- Setup\n- A very very very very very very long option exceeding fifty chars total",
        );
        assert_eq!(parsed.text, "Here are options:");
        assert_eq!(parsed.options, vec!["Estimate", "Setup"]);
    }

    #[test]
    fn falls_back_to_cleaned_text_when_only_bullets() {
        let input = "- only\n- bullets\n- here";
        let parsed = parse_response(input);
        assert_eq!(parsed.text, input);
        assert_eq!(parsed.options, vec!["only", "bullets", "here"]);
    }

    #[test]
    fn fallback_keeps_bold_stripped_text() {
        let parsed = parse_response("- **Smart** Lighting\n- Voice Control");
        assert_eq!(parsed.text, "- Smart Lighting\n- Voice Control");
        assert_eq!(parsed.options, vec!["Smart Lighting", "Voice Control"]);
    }

    #[test]
    fn strips_bold_markers() {
        let parsed = parse_response("**Hello** world");
        assert_eq!(parsed.text, "Hello world");
        assert!(parsed.options.is_empty());
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_response(""), ParsedResponse::default());
    }

    #[test]
    fn whitespace_only_input_falls_back_untrimmed() {
        let parsed = parse_response("  \n ");
        assert_eq!(parsed.text, "  \n ");
        assert!(parsed.options.is_empty());
    }

    #[test]
    fn recognises_every_bullet_form() {
        let parsed = parse_response(
            "Choose:\n- dash\n* star\n• dot\n1. numbered\n2) paren\n3 bare digit",
        );
        assert_eq!(parsed.text, "Choose:");
        assert_eq!(
            parsed.options,
            vec!["dash", "star", "dot", "numbered", "paren", "bare digit"]
        );
    }

    #[test]
    fn bullet_needs_trailing_whitespace() {
        let parsed = parse_response("-dash\n2024 was a good year\n1.5 litres");
        assert!(parsed.options.is_empty());
        assert_eq!(parsed.text, "-dash\n2024 was a good year\n1.5 litres");
    }

    #[test]
    fn multi_digit_numbers_are_not_bullets() {
        let parsed = parse_response("Steps:\n10. tenth");
        assert!(parsed.options.is_empty());
        assert_eq!(parsed.text, "Steps:\n10. tenth");
    }

    #[test]
    fn short_lines_are_dropped() {
        let parsed = parse_response("Hi there\n\nx\n  \nBye now");
        assert_eq!(parsed.text, "Hi there\nBye now");
    }

    #[test]
    fn lines_are_trimmed() {
        let parsed = parse_response("   Indented body   \n\t-   padded option  ");
        assert_eq!(parsed.text, "Indented body");
        assert_eq!(parsed.options, vec!["padded option"]);
    }

    #[test]
    fn option_length_boundary() {
        let at_limit = "a".repeat(MAX_OPTION_CHARS);
        let below = "b".repeat(MAX_OPTION_CHARS - 1);
        let parsed = parse_response(&format!("Body line\n- {at_limit}\n- {below}"));
        assert_eq!(parsed.options, vec![below]);
        assert_eq!(parsed.text, "Body line");
    }

    #[test]
    fn option_length_counts_utf16_units() {
        let accented = "é".repeat(MAX_OPTION_CHARS - 1);
        let kept_pairs = "😀".repeat(MAX_OPTION_CHARS / 2 - 1);
        let dropped_pairs = "😀".repeat(MAX_OPTION_CHARS / 2);
        let parsed = parse_response(&format!(
            "Pick:\n- {accented}\n- {kept_pairs}\n- {dropped_pairs}"
        ));
        assert_eq!(parsed.text, "Pick:");
        assert_eq!(parsed.options, vec![accented, kept_pairs]);
    }

    #[test]
    fn single_emoji_line_is_body_text() {
        let parsed = parse_response("Thanks!\n👍");
        assert_eq!(parsed.text, "Thanks!\n👍");
        assert!(parsed.options.is_empty());

        let parsed = parse_response("Thanks!\né");
        assert_eq!(parsed.text, "Thanks!");
    }

    #[test]
    fn byte_order_mark_is_whitespace() {
        let parsed = parse_response("\u{FEFF}Pick one:\u{FEFF}\n-\u{FEFF}Yes\u{FEFF}");
        assert_eq!(parsed.text, "Pick one:");
        assert_eq!(parsed.options, vec!["Yes"]);
    }

    #[test]
    fn next_line_control_is_not_whitespace() {
        let parsed = parse_response("Intro line\n-\u{85}No\n\u{85}");
        assert!(parsed.options.is_empty());
        assert_eq!(parsed.text, "Intro line\n-\u{85}No");
    }

    #[test]
    fn carriage_returns_are_trimmed() {
        let parsed = parse_response("Pick one:\r\n- Yes\r\n- No\r\n");
        assert_eq!(parsed.text, "Pick one:");
        assert_eq!(parsed.options, vec!["Yes", "No"]);
    }

    #[test]
    fn body_text_is_idempotent() {
        for input in [
            "**Hello** world",
            "First line\n\n  Second line  \n",
            "Plain sentence.",
            "a\nLonger line",
        ] {
            let once = parse_response(input);
            let twice = parse_response(&once.text);
            assert_eq!(once.text, twice.text, "input: {input:?}");
            assert!(twice.options.is_empty());
        }
    }
}
