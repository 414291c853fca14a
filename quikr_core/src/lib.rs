#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod identity;
pub mod parser;
pub mod store;
pub mod util;

pub use identity::{ClientIdentity, DEVICE_ID_KEY, IdentityManager, Identifier, SESSION_ID_KEY};
pub use parser::{MAX_OPTION_CHARS, ParsedResponse, parse_response};
pub use store::MemoryStore;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One turn in the transcript.
///
/// Only `interaction_done` may change after the entry is appended, and only
/// from `false` to `true`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatEntry {
    pub sender: Sender,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default)]
    pub interaction_done: bool,
    #[serde(default)]
    pub error: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatEntry {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            options: Vec::new(),
            interaction_done: false,
            error: false,
            created_at: Utc::now(),
        }
    }

    /// Bot entry built from a parsed reply; its options are live.
    #[must_use]
    pub fn bot(parsed: ParsedResponse) -> Self {
        Self {
            sender: Sender::Bot,
            text: parsed.text,
            options: parsed.options,
            interaction_done: false,
            error: false,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            options: Vec::new(),
            interaction_done: false,
            error: true,
            created_at: Utc::now(),
        }
    }

    pub const fn mark_done(&mut self) {
        self.interaction_done = true;
    }

    /// Options still offered as quick-reply chips.
    #[must_use]
    pub fn live_options(&self) -> &[String] {
        if self.sender == Sender::Bot && !self.interaction_done {
            &self.options
        } else {
            &[]
        }
    }
}

/// Body POSTed to the chat webhook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookRequest {
    pub message: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "macId")]
    pub device_id: String,
}

impl WebhookRequest {
    #[must_use]
    pub fn new(message: impl Into<String>, identity: &ClientIdentity) -> Self {
        Self {
            message: message.into(),
            session_id: identity.session_id.to_string(),
            device_id: identity.device_id.to_string(),
        }
    }
}

/// Remote side of the conversation: one request, one complete reply text.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, request: &WebhookRequest) -> anyhow::Result<String>;
}

/// Durable string-to-string storage holding the client identifiers.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

#[async_trait]
impl<T: ChatBackend + ?Sized> ChatBackend for Arc<T> {
    async fn send(&self, request: &WebhookRequest) -> anyhow::Result<String> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).set(key, value).await
    }
}
