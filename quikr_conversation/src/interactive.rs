//! Line-oriented terminal front end for the controller.
//!
//! Plain lines are submitted as messages. A number picks the matching chip
//! of the current view. `/open`, `/close`, `/home` and `/chat` are view
//! intents; `exit`, `quit` or `q` ends the session.

use quikr_core::ChatBackend;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::controller::{ConversationController, ConversationError, SubmitOutcome, WidgetTab};
use crate::render::{TYPING_INDICATOR, render_chips, render_entry, render_view};

impl<B> ConversationController<B>
where
    B: ChatBackend + Send + Sync,
{
    /// Run the widget on stdin/stdout until the user quits or input ends.
    pub async fn run_interactive(&self) -> Result<(), ConversationError> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        self.run_with_io(stdin, &mut stdout).await
    }

    /// Same as [`Self::run_interactive`] over arbitrary input and output.
    pub async fn run_with_io<R, W>(&self, input: R, out: &mut W) -> Result<(), ConversationError>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        self.open().await;
        writeln!(out, "{}", render_view(&self.snapshot().await, self.settings()))?;
        writeln!(out, "Type 'exit', 'quit', or Ctrl+C to end the session.\n")?;

        let mut lines = input.lines();
        loop {
            write!(out, "{} > ", self.settings().input_placeholder)?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let command = line.trim();

            match command {
                "exit" | "quit" | "q" => break,
                "" => continue,
                "/open" => {
                    self.open().await;
                    self.print_view(out).await?;
                    continue;
                }
                "/close" => {
                    self.close().await;
                    self.print_view(out).await?;
                    continue;
                }
                "/home" => {
                    self.select_tab(WidgetTab::Home).await;
                    self.print_view(out).await?;
                    continue;
                }
                "/chat" => {
                    self.select_tab(WidgetTab::Chat).await;
                    self.print_view(out).await?;
                    continue;
                }
                _ => {}
            }

            if !self.view().await.open {
                self.print_view(out).await?;
                continue;
            }

            let chip = self.resolve_chip(command).await;
            let shown = chip.as_deref().unwrap_or(&line);
            writeln!(out, "\n{}", render_entry(&quikr_core::ChatEntry::user(shown)))?;
            writeln!(out, "{TYPING_INDICATOR}")?;
            out.flush()?;

            let outcome = match chip {
                Some(text) => self.submit_text(text).await,
                None => {
                    self.set_input(line).await;
                    self.submit().await
                }
            };

            match outcome {
                SubmitOutcome::Replied(entry) | SubmitOutcome::Failed(entry) => {
                    writeln!(out, "{}", render_entry(&entry))?;
                    let options = entry.live_options();
                    if !options.is_empty() {
                        writeln!(out, "{}", render_chips(options))?;
                    }
                    writeln!(out)?;
                }
                other => debug!("Submission produced no reply: {other:?}"),
            }
        }

        self.teardown();
        let turns = self.transcript().await.len();
        writeln!(out, "\nSession ended. Total entries: {turns}")?;
        Ok(())
    }

    /// Text of the chip whose 1-based number was typed, if any.
    async fn resolve_chip(&self, typed: &str) -> Option<String> {
        let index = typed.parse::<usize>().ok()?.checked_sub(1)?;

        let snapshot = self.snapshot().await;
        match snapshot.view.tab {
            WidgetTab::Home => self.settings().starter_prompts.get(index).cloned(),
            WidgetTab::Chat => snapshot.live_options().get(index).cloned(),
        }
    }

    async fn print_view<W: Write>(&self, out: &mut W) -> Result<(), ConversationError> {
        writeln!(out, "{}", render_view(&self.snapshot().await, self.settings()))?;
        Ok(())
    }
}
