//! Dispatcher contract

use async_trait::async_trait;
use serde::Serialize;

/// Result of one dispatch across all channels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    pub delivered: bool,
    /// Name of the channel that delivered
    pub channel: Option<String>,
    pub message_id: Option<String>,
    /// Combined failure description when nothing delivered
    pub error: Option<String>,
}

impl DeliveryReport {
    pub fn delivered(channel: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            delivered: true,
            channel: Some(channel.into()),
            message_id: Some(message_id.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            delivered: false,
            channel: None,
            message_id: None,
            error: Some(error.into()),
        }
    }
}

/// Delivers a text message to a phone number over whichever channel works
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn send(&self, destination: &str, body: &str) -> DeliveryReport;
}
