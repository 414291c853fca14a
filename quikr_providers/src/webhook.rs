use async_trait::async_trait;
use quikr_core::{ChatBackend, WebhookRequest};
use reqwest::Client;
use tracing::{debug, info};

use crate::reply::extract_reply_text;

/// Chat backend that POSTs each message to a fixed webhook URL.
///
/// One request per message: no retries, no timeout, no auth headers.
pub struct WebhookProvider {
    client: Client,
    url: String,
}

impl WebhookProvider {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        info!("Creating WebhookProvider for {}", url);
        Self {
            client: Client::new(),
            url,
        }
    }

    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatBackend for WebhookProvider {
    async fn send(&self, request: &WebhookRequest) -> anyhow::Result<String> {
        debug!(
            "Posting message to webhook: {} chars, session={}",
            request.message.chars().count(),
            request.session_id
        );

        let payload = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        let reply = extract_reply_text(&payload)?;

        info!("Received webhook reply: {} chars", reply.chars().count());
        Ok(reply)
    }
}
