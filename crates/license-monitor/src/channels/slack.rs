//! Slack webhook alert channel.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use super::AlertChannel;
use crate::error::{MonitorError, Result};

/// Slack incoming webhook channel.
pub struct SlackChannel {
    webhook_url: String,
    client: reqwest::Client,
}

impl SlackChannel {
    /// Create a Slack channel with a specific webhook URL.
    #[must_use]
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AlertChannel for SlackChannel {
    fn name(&self) -> &'static str {
        "slack"
    }

    async fn send(&self, message: &str) -> Result<()> {
        let payload = SlackPayload { text: message };

        debug!(channel = "slack", "Sending alert");

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?;

        if response.status().is_success() {
            debug!(channel = "slack", "Alert sent successfully");
            Ok(())
        } else {
            let err = MonitorError::from_response("slack", response).await;
            warn!(channel = "slack", error = %err, "Slack webhook request failed");
            Err(err)
        }
    }
}

// =============================================================================
// Slack API types
// =============================================================================

#[derive(Debug, Serialize)]
struct SlackPayload<'a> {
    text: &'a str,
}
