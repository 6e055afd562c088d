//! Discord webhook delivery.
//!
//! [`DiscordWebhook`] posts a plain-text message to a channel webhook via
//! HTTP POST. Delivery is a single attempt: a failed notification is
//! reported to the caller, which logs it and moves on.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use mowwatch_core::{Notifier, NotifyError};

/// Discord's webhook API root.
pub const DISCORD_WEBHOOK_BASE_URL: &str = "https://discord.com/api/webhooks";

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Webhook id and token, as shown in the webhook URL
/// `https://discord.com/api/webhooks/{id}/{token}`.
#[derive(Clone)]
pub struct DiscordKeys {
    pub webhook_id: String,
    pub webhook_token: String,
}

impl fmt::Debug for DiscordKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordKeys")
            .field("webhook_id", &self.webhook_id)
            .field("webhook_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    content: &'a str,
}

// ---------------------------------------------------------------------------
// DiscordWebhook
// ---------------------------------------------------------------------------

/// Sends notifications to one Discord channel webhook.
pub struct DiscordWebhook {
    client: reqwest::Client,
    url: String,
}

impl DiscordWebhook {
    /// Create a webhook client for the public Discord API.
    pub fn new(keys: &DiscordKeys) -> Self {
        Self::with_base_url(DISCORD_WEBHOOK_BASE_URL, keys)
    }

    /// Create a webhook client against another API root (e.g. a test server).
    pub fn with_base_url(base_url: &str, keys: &DiscordKeys) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self::with_client(client, base_url, keys)
    }

    /// Create a webhook client reusing an existing [`reqwest::Client`], whose
    /// timeout then bounds every delivery attempt.
    pub fn with_client(client: reqwest::Client, base_url: &str, keys: &DiscordKeys) -> Self {
        Self {
            client,
            url: format!(
                "{}/{}/{}",
                base_url.trim_end_matches('/'),
                keys.webhook_id,
                keys.webhook_token
            ),
        }
    }
}

#[async_trait]
impl Notifier for DiscordWebhook {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookMessage { content: message })
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifyError::HttpStatus(response.status().as_u16()));
        }

        tracing::debug!(chars = message.chars().count(), "Discord notification delivered");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
