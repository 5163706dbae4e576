//! SMS Service Module
//!
//! SMS channels used to deliver verification codes:
//!
//! - **Twilio**: primary production channel
//! - **Vonage**: secondary production channel
//! - **Mock**: records messages in development
//!
//! `create_dispatcher` assembles the configured channels behind a
//! `FailoverSmsService`, which is what the verification service talks to.

use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use er_shared::{Environment, SmsConfig, SmsProviderKind};

pub mod failover_sms;
pub mod mock_sms;
pub mod sms_service;
pub mod twilio;
pub mod vonage;

pub use failover_sms::FailoverSmsService;
pub use mock_sms::{MockSmsService, SentSms};
pub use sms_service::SmsService;
pub use twilio::TwilioSmsService;
pub use vonage::VonageSmsService;

use crate::InfrastructureError;

#[cfg(test)]
pub mod tests;

/// Build the failover dispatcher from configuration
///
/// Channels are added in `config.channels` order. A provider listed without
/// credentials is skipped. In development, when no real provider remains and
/// `mock_in_development` is set, the mock channel is used instead.
pub fn create_dispatcher(
    config: &SmsConfig,
    environment: Environment,
) -> Result<FailoverSmsService, InfrastructureError> {
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let mut channels: Vec<Arc<dyn SmsService>> = Vec::new();

    for kind in &config.channels {
        match kind {
            SmsProviderKind::Twilio => match &config.twilio {
                Some(twilio) => channels.push(Arc::new(TwilioSmsService::new(twilio.clone(), timeout)?)),
                None => warn!("Twilio channel listed but not configured"),
            },
            SmsProviderKind::Vonage => match &config.vonage {
                Some(vonage) => channels.push(Arc::new(VonageSmsService::new(vonage.clone(), timeout)?)),
                None => warn!("Vonage channel listed but not configured"),
            },
            SmsProviderKind::Mock => {
                if environment.is_production() {
                    return Err(InfrastructureError::Config(
                        "Mock SMS channel cannot be used in production".to_string(),
                    ));
                }
                channels.push(Arc::new(MockSmsService::new()));
            }
        }
    }

    let has_usable_channel = channels.iter().any(|c| c.is_configured());
    if !has_usable_channel && environment.is_development() && config.mock_in_development {
        warn!("No SMS provider configured, using mock channel");
        channels.push(Arc::new(MockSmsService::new()));
    }

    FailoverSmsService::new(channels)
}
