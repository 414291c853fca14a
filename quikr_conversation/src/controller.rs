//! Conversation controller for one widget instance.
//!
//! The `ConversationController` owns the transcript, the input buffer, the
//! `loading` flag and the view state. Submitting a message appends the user
//! entry immediately, then awaits the backend without holding the state
//! lock, so overlapping submissions complete in arrival order.

use quikr_core::util::{CONNECTION_ERROR_MESSAGE, is_blank};
use quikr_core::{ChatBackend, ChatEntry, ClientIdentity, WebhookRequest, parse_response};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::settings::WidgetSettings;
use crate::transcript::{Transcript, latest_live_options};

/// Errors raised outside the request/response cycle.
///
/// Backend failures never show up here: they become error entries in the
/// transcript.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetTab {
    /// Starter prompts
    Home,
    /// Live transcript
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WidgetView {
    pub open: bool,
    pub tab: WidgetTab,
}

impl Default for WidgetView {
    fn default() -> Self {
        Self {
            open: false,
            tab: WidgetTab::Home,
        }
    }
}

/// Everything the presentation layer reads, taken under one lock.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetSnapshot {
    pub entries: Vec<ChatEntry>,
    pub loading: bool,
    pub input: String,
    pub view: WidgetView,
}

impl WidgetSnapshot {
    /// Chips of the latest bot entry that have not been acted upon.
    #[must_use]
    pub fn live_options(&self) -> &[String] {
        latest_live_options(&self.entries)
    }
}

/// What happened to one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The text was blank; nothing was appended.
    Ignored,
    /// The bot entry appended for a successful reply.
    Replied(ChatEntry),
    /// The error entry appended for a failed call.
    Failed(ChatEntry),
    /// The widget was torn down before the reply arrived.
    Dropped,
}

#[derive(Debug, Default)]
struct WidgetState {
    transcript: Transcript,
    input: String,
    loading: bool,
    view: WidgetView,
}

/// Controller for one widget instance.
pub struct ConversationController<B = Arc<dyn ChatBackend>>
where
    B: Send + Sync,
{
    backend: B,
    identity: ClientIdentity,
    settings: WidgetSettings,
    state: Mutex<WidgetState>,
    mounted: AtomicBool,
}

impl<B> ConversationController<B>
where
    B: ChatBackend + Send + Sync,
{
    /// Create a controller for a freshly mounted, closed widget.
    pub fn new(backend: B, identity: ClientIdentity, settings: WidgetSettings) -> Self {
        info!("Creating conversation controller");
        debug!(
            "Controller identity: session={} device={}",
            identity.session_id, identity.device_id
        );

        Self {
            backend,
            identity,
            settings,
            state: Mutex::new(WidgetState::default()),
            mounted: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub const fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    #[must_use]
    pub const fn settings(&self) -> &WidgetSettings {
        &self.settings
    }

    /// Replace the pending-input buffer.
    pub async fn set_input(&self, text: impl Into<String>) {
        self.state.lock().await.input = text.into();
    }

    pub async fn input(&self) -> String {
        self.state.lock().await.input.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.loading
    }

    /// Whether the send button is enabled: non-blank input and no request
    /// outstanding.
    pub async fn can_send(&self) -> bool {
        let state = self.state.lock().await;
        !state.loading && !is_blank(&state.input)
    }

    pub async fn transcript(&self) -> Vec<ChatEntry> {
        self.state.lock().await.transcript.entries().to_vec()
    }

    pub async fn view(&self) -> WidgetView {
        self.state.lock().await.view
    }

    pub async fn snapshot(&self) -> WidgetSnapshot {
        let state = self.state.lock().await;
        WidgetSnapshot {
            entries: state.transcript.entries().to_vec(),
            loading: state.loading,
            input: state.input.clone(),
            view: state.view,
        }
    }

    /// Open or close the widget. Opening with an empty transcript lands on
    /// the home view.
    pub async fn toggle(&self) -> WidgetView {
        let mut state = self.state.lock().await;
        if !state.view.open && state.transcript.is_empty() {
            state.view.tab = WidgetTab::Home;
        }
        state.view.open = !state.view.open;
        state.view
    }

    pub async fn open(&self) -> WidgetView {
        let mut state = self.state.lock().await;
        if !state.view.open {
            if state.transcript.is_empty() {
                state.view.tab = WidgetTab::Home;
            }
            state.view.open = true;
        }
        state.view
    }

    pub async fn close(&self) {
        self.state.lock().await.view.open = false;
    }

    pub async fn select_tab(&self, tab: WidgetTab) {
        self.state.lock().await.view.tab = tab;
    }

    /// Send the input buffer and clear it.
    pub async fn submit(&self) -> SubmitOutcome {
        let text = self.input().await;
        self.send(text, true).await
    }

    /// Send `text` as if typed, leaving the input buffer untouched. Used for
    /// starter prompts and quick-reply chips.
    pub async fn submit_text(&self, text: impl Into<String>) -> SubmitOutcome {
        self.send(text.into(), false).await
    }

    /// Send the live option at `index` of the latest bot entry.
    pub async fn choose_option(&self, index: usize) -> SubmitOutcome {
        let option = self
            .state
            .lock()
            .await
            .transcript
            .live_options()
            .get(index)
            .cloned();

        match option {
            Some(text) => self.submit_text(text).await,
            None => {
                debug!("No live option at index {index}");
                SubmitOutcome::Ignored
            }
        }
    }

    /// Send the starter prompt at `index`.
    pub async fn choose_starter(&self, index: usize) -> SubmitOutcome {
        match self.settings.starter_prompts.get(index).cloned() {
            Some(text) => self.submit_text(text).await,
            None => {
                debug!("No starter prompt at index {index}");
                SubmitOutcome::Ignored
            }
        }
    }

    /// Mark the widget as unmounted. Replies arriving afterwards are dropped.
    pub fn teardown(&self) {
        info!("Tearing down conversation controller");
        self.mounted.store(false, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    async fn send(&self, text: String, from_buffer: bool) -> SubmitOutcome {
        if is_blank(&text) {
            return SubmitOutcome::Ignored;
        }
        if !self.is_mounted() {
            debug!("Ignoring submission after teardown");
            return SubmitOutcome::Dropped;
        }

        {
            let mut state = self.state.lock().await;
            state.view.tab = WidgetTab::Chat;
            state.transcript.mark_all_done();
            state.transcript.push(ChatEntry::user(text.clone()));
            if from_buffer {
                state.input.clear();
            }
            state.loading = true;
        }

        let request = WebhookRequest::new(text, &self.identity);
        let result = self.backend.send(&request).await;

        if !self.is_mounted() {
            debug!("Dropping reply that arrived after teardown");
            return SubmitOutcome::Dropped;
        }

        let entry = match result {
            Ok(raw) => {
                let parsed = parse_response(&raw);
                debug!(
                    "Parsed reply: {} chars, {} option(s)",
                    parsed.text.chars().count(),
                    parsed.options.len()
                );
                ChatEntry::bot(parsed)
            }
            Err(e) => {
                warn!("Chat backend request failed: {e:#}");
                ChatEntry::failure(CONNECTION_ERROR_MESSAGE)
            }
        };

        let mut state = self.state.lock().await;
        state.transcript.push(entry.clone());
        state.loading = false;

        if entry.error {
            SubmitOutcome::Failed(entry)
        } else {
            SubmitOutcome::Replied(entry)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quikr_core::{Identifier, Sender};

    struct Echo;

    #[async_trait]
    impl ChatBackend for Echo {
        async fn send(&self, request: &WebhookRequest) -> anyhow::Result<String> {
            Ok(format!("You said {}\n- Again\n- Stop", request.message))
        }
    }

    fn identity() -> ClientIdentity {
        ClientIdentity {
            session_id: Identifier::from("session".to_string()),
            device_id: Identifier::from("device".to_string()),
        }
    }

    fn controller() -> ConversationController<Echo> {
        ConversationController::new(Echo, identity(), WidgetSettings::default())
    }

    #[tokio::test]
    async fn test_toggle_opens_on_home_when_empty() {
        let widget = controller();
        assert_eq!(widget.view().await, WidgetView::default());

        let view = widget.toggle().await;
        assert!(view.open);
        assert_eq!(view.tab, WidgetTab::Home);

        widget.close().await;
        assert!(!widget.view().await.open);
    }

    #[tokio::test]
    async fn test_reopen_keeps_chat_tab_with_history() {
        let widget = controller();
        widget.open().await;
        widget.submit_text("Hi").await;
        widget.close().await;

        let view = widget.open().await;
        assert!(view.open);
        assert_eq!(view.tab, WidgetTab::Chat);
    }

    #[tokio::test]
    async fn test_blank_submit_is_ignored() {
        let widget = controller();
        widget.set_input("   ").await;

        assert!(!widget.can_send().await);
        assert_eq!(widget.submit().await, SubmitOutcome::Ignored);
        assert!(widget.transcript().await.is_empty());
        assert_eq!(widget.input().await, "   ");
    }

    #[tokio::test]
    async fn test_submit_clears_buffer_but_chip_does_not() {
        let widget = controller();
        widget.set_input("Hello").await;
        assert!(widget.can_send().await);

        widget.submit().await;
        assert_eq!(widget.input().await, "");

        widget.set_input("draft").await;
        widget.choose_option(0).await;
        assert_eq!(widget.input().await, "draft");

        let entries = widget.transcript().await;
        assert_eq!(entries[2].sender, Sender::User);
        assert_eq!(entries[2].text, "Again");
    }

    #[tokio::test]
    async fn test_choose_option_out_of_range() {
        let widget = controller();
        assert_eq!(widget.choose_option(0).await, SubmitOutcome::Ignored);
        assert_eq!(widget.choose_starter(99).await, SubmitOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_choose_starter_switches_to_chat() {
        let widget = controller();
        widget.open().await;

        let outcome = widget.choose_starter(1).await;
        assert!(matches!(outcome, SubmitOutcome::Replied(_)));

        let snapshot = widget.snapshot().await;
        assert_eq!(snapshot.view.tab, WidgetTab::Chat);
        assert_eq!(snapshot.entries[0].text, "Automation Setup");
        assert_eq!(snapshot.live_options(), ["Again", "Stop"]);
    }

    #[tokio::test]
    async fn test_submit_after_teardown_is_dropped() {
        let widget = controller();
        widget.teardown();

        assert_eq!(widget.submit_text("Hi").await, SubmitOutcome::Dropped);
        assert!(widget.transcript().await.is_empty());
    }
}
