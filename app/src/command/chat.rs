//! Chat command: the widget rendered in the terminal.

use quikr_config::Config;
use quikr_conversation::render::{render_chips, render_entry};
use quikr_conversation::{ConversationController, SubmitOutcome, WidgetSettings};
use tracing::info;

use super::init_common_components;

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Optional single message to send (non-interactive mode)
    pub message: Option<String>,
}

/// Strategy for executing the Chat command.
///
/// With a message it sends one turn and prints the parsed reply and its
/// quick-reply options; otherwise it runs the interactive widget.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

fn widget_settings(config: &Config) -> WidgetSettings {
    let widget = config.widget.clone();
    WidgetSettings::default()
        .with_header(widget.title, widget.subtitle)
        .with_welcome_message(widget.welcome_message)
        .with_starter_prompts(widget.starter_prompts)
        .with_input_placeholder(widget.input_placeholder)
}

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components().await?;

        let controller = ConversationController::new(
            common.provider,
            common.identity,
            widget_settings(&common.config),
        );

        if let Some(msg) = input.message {
            match controller.submit_text(msg).await {
                SubmitOutcome::Replied(entry) | SubmitOutcome::Failed(entry) => {
                    println!("{}", render_entry(&entry));
                    if !entry.options.is_empty() {
                        println!("{}", render_chips(&entry.options));
                    }
                }
                SubmitOutcome::Ignored => anyhow::bail!("Message is empty"),
                SubmitOutcome::Dropped => {}
            }
        } else {
            controller.run_interactive().await?;

            info!(
                "Chat ended: {} transcript entries",
                controller.transcript().await.len()
            );
        }

        Ok(())
    }
}
