//! Ordered failover across SMS channels
//!
//! Channels are tried once each, in configuration order, until one accepts
//! the message. Channels without credentials are dropped at construction so
//! a send never waits on a provider that cannot succeed.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use er_core::services::dispatch::{DeliveryReport, NotificationDispatcher};
use er_shared::phone::mask_phone_number;

use crate::sms::sms_service::SmsService;
use crate::InfrastructureError;

pub struct FailoverSmsService {
    channels: Vec<Arc<dyn SmsService>>,
}

impl FailoverSmsService {
    /// Build from channels in priority order
    ///
    /// Fails when no channel is configured.
    pub fn new(channels: Vec<Arc<dyn SmsService>>) -> Result<Self, InfrastructureError> {
        let channels: Vec<Arc<dyn SmsService>> = channels
            .into_iter()
            .filter(|channel| {
                let configured = channel.is_configured();
                if !configured {
                    warn!(
                        provider = channel.provider_name(),
                        "SMS channel missing credentials, skipping"
                    );
                }
                configured
            })
            .collect();

        if channels.is_empty() {
            return Err(InfrastructureError::Config(
                "No SMS provider is configured".to_string(),
            ));
        }

        let service = Self { channels };
        info!(channels = ?service.channel_names(), "SMS failover initialized");
        Ok(service)
    }

    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.provider_name()).collect()
    }
}

#[async_trait]
impl NotificationDispatcher for FailoverSmsService {
    async fn send(&self, destination: &str, body: &str) -> DeliveryReport {
        let masked = mask_phone_number(destination);
        let mut failures = Vec::with_capacity(self.channels.len());

        for channel in &self.channels {
            let provider = channel.provider_name();
            match channel.send_sms(destination, body).await {
                Ok(message_id) => {
                    if !failures.is_empty() {
                        info!(
                            provider,
                            phone = %masked,
                            failed_channels = failures.len(),
                            "SMS delivered after failover"
                        );
                    }
                    return DeliveryReport::delivered(provider, message_id);
                }
                Err(e) => {
                    warn!(provider, phone = %masked, error = %e, "SMS channel failed");
                    failures.push(format!("{}: {}", provider, e));
                }
            }
        }

        error!(phone = %masked, "All SMS channels failed");
        DeliveryReport::failed(format!("All SMS providers failed ({})", failures.join("; ")))
    }
}
