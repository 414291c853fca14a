use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use quikr_core::util::{
    DEFAULT_INPUT_PLACEHOLDER, DEFAULT_STARTER_PROMPTS, DEFAULT_SUBTITLE, DEFAULT_TITLE,
    DEFAULT_WELCOME_MESSAGE,
};

const CONFIG_DIR_NAME: &str = "quikr";
const CONFIG_FILE_NAME: &str = "config.json";
const IDENTITY_DB_FILE_NAME: &str = "identity.db";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default = "Config::default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WebhookConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StorageConfig {
    /// SQLite file holding the identifiers. Defaults to `~/quikr/identity.db`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WidgetConfig {
    #[serde(default = "WidgetConfig::default_title")]
    pub title: String,
    #[serde(default = "WidgetConfig::default_subtitle")]
    pub subtitle: String,
    #[serde(default = "WidgetConfig::default_welcome_message")]
    pub welcome_message: String,
    #[serde(default = "WidgetConfig::default_starter_prompts")]
    pub starter_prompts: Vec<String>,
    #[serde(default = "WidgetConfig::default_input_placeholder")]
    pub input_placeholder: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            title: Self::default_title(),
            subtitle: Self::default_subtitle(),
            welcome_message: Self::default_welcome_message(),
            starter_prompts: Self::default_starter_prompts(),
            input_placeholder: Self::default_input_placeholder(),
        }
    }
}

impl WidgetConfig {
    fn default_title() -> String {
        DEFAULT_TITLE.to_string()
    }

    fn default_subtitle() -> String {
        DEFAULT_SUBTITLE.to_string()
    }

    fn default_welcome_message() -> String {
        DEFAULT_WELCOME_MESSAGE.to_string()
    }

    fn default_starter_prompts() -> Vec<String> {
        DEFAULT_STARTER_PROMPTS.iter().map(ToString::to_string).collect()
    }

    fn default_input_placeholder() -> String {
        DEFAULT_INPUT_PLACEHOLDER.to_string()
    }
}

impl Config {
    fn default_log_level() -> String {
        "warn".to_string()
    }

    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR_NAME))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'quikr init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config at {}: {e}", path.display()))?;

        if config.webhook.url.trim().is_empty() {
            anyhow::bail!("webhook.url is empty in {}", path.display());
        }

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Where the identity database lives.
    pub fn storage_path(&self) -> anyhow::Result<PathBuf> {
        match &self.storage.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join(IDENTITY_DB_FILE_NAME)),
        }
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;

        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        Self::write_template(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the config file and set webhook.url to your chat webhook");
        println!("   2. Run 'quikr chat' to open the widget");
        println!();
        println!("🔧 Configuration options:");
        println!("   - storage.path: SQLite file keeping the session and device identifiers");
        println!("   - widget.starter_prompts: Quick prompts offered before the first message");
        println!("   - log_level: tracing filter used when RUST_LOG is not set");
        println!();
        Ok(())
    }

    /// Write the config template to `config_path`, refusing to overwrite.
    pub fn write_template(config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(config_path, CONFIG_TEMPLATE)?;
        Ok(())
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "webhook": {
    "url": "https://example.com/webhook/chatbot"
  },
  "widget": {
    "title": "Transcend Assistant",
    "subtitle": "Home Theater • Automation • Audio Help",
    "welcome_message": "Welcome to Transcend! I'm your Theater Assistant. How can I help you create the ultimate cinematic experience at home?",
    "starter_prompts": [
      "Home Theater Estimate",
      "Automation Setup",
      "Audio Calibration",
      "Free Walkthrough"
    ],
    "input_placeholder": "How can we help you?"
  },
  "log_level": "warn"
}"#;
