//! Presentation settings for one widget instance.

use quikr_core::util::{
    DEFAULT_INPUT_PLACEHOLDER, DEFAULT_STARTER_PROMPTS, DEFAULT_SUBTITLE, DEFAULT_TITLE,
    DEFAULT_WELCOME_MESSAGE,
};

/// Texts shown around the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSettings {
    /// Header title
    pub title: String,
    /// Header subtitle
    pub subtitle: String,
    /// Greeting rendered above the transcript
    pub welcome_message: String,
    /// Prompts offered on the home view
    pub starter_prompts: Vec<String>,
    /// Hint shown at the input prompt
    pub input_placeholder: String,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            starter_prompts: DEFAULT_STARTER_PROMPTS
                .iter()
                .map(ToString::to_string)
                .collect(),
            input_placeholder: DEFAULT_INPUT_PLACEHOLDER.to_string(),
        }
    }
}

impl WidgetSettings {
    /// Set the header title and subtitle.
    #[must_use]
    pub fn with_header(mut self, title: String, subtitle: String) -> Self {
        self.title = title;
        self.subtitle = subtitle;
        self
    }

    /// Set the welcome message.
    #[must_use]
    pub fn with_welcome_message(mut self, message: String) -> Self {
        self.welcome_message = message;
        self
    }

    /// Set the starter prompts.
    #[must_use]
    pub fn with_starter_prompts(mut self, prompts: Vec<String>) -> Self {
        self.starter_prompts = prompts;
        self
    }

    /// Set the input placeholder.
    #[must_use]
    pub fn with_input_placeholder(mut self, placeholder: String) -> Self {
        self.input_placeholder = placeholder;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = WidgetSettings::default();
        assert_eq!(settings.starter_prompts.len(), 4);
        assert_eq!(settings.starter_prompts[1], "Automation Setup");
        assert!(!settings.welcome_message.is_empty());
    }

    #[test]
    fn test_settings_builders() {
        let settings = WidgetSettings::default()
            .with_header("Support".to_string(), "Ask us".to_string())
            .with_starter_prompts(vec!["Pricing".to_string()]);

        assert_eq!(settings.title, "Support");
        assert_eq!(settings.subtitle, "Ask us");
        assert_eq!(settings.starter_prompts, vec!["Pricing".to_string()]);
    }
}
