//! Vonage (Nexmo) SMS channel

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

use er_shared::config::VonageConfig;
use er_shared::phone::mask_phone_number;

use crate::sms::sms_service::SmsService;
use crate::InfrastructureError;

pub const PROVIDER_NAME: &str = "Vonage";

/// Status Vonage reports for an accepted message
const STATUS_OK: &str = "0";

#[derive(Debug, Deserialize)]
struct VonageResponse {
    #[serde(default)]
    messages: Vec<VonageMessageStatus>,
}

#[derive(Debug, Deserialize)]
struct VonageMessageStatus {
    status: String,
    #[serde(rename = "message-id", default)]
    message_id: Option<String>,
    #[serde(rename = "error-text", default)]
    error_text: Option<String>,
}

impl VonageResponse {
    /// Vonage answers 200 even for rejected messages; the first status decides
    fn into_message_id(self) -> Result<String, InfrastructureError> {
        let first = self
            .messages
            .into_iter()
            .next()
            .ok_or_else(|| InfrastructureError::Sms("Vonage returned no message status".to_string()))?;

        if first.status != STATUS_OK {
            return Err(InfrastructureError::Sms(format!(
                "Vonage status {}: {}",
                first.status,
                first.error_text.unwrap_or_else(|| "unknown error".to_string())
            )));
        }

        first
            .message_id
            .ok_or_else(|| InfrastructureError::Sms("Vonage returned no message id".to_string()))
    }
}

pub struct VonageSmsService {
    client: reqwest::Client,
    config: VonageConfig,
}

impl VonageSmsService {
    pub fn new(config: VonageConfig, request_timeout: Duration) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self { client, config })
    }

    fn sms_url(&self) -> String {
        format!("{}/sms/json", self.config.base_url.trim_end_matches('/'))
    }
}

/// Vonage expects the destination without the leading `+`
fn vonage_destination(to: &str) -> &str {
    to.trim_start_matches('+')
}

#[async_trait]
impl SmsService for VonageSmsService {
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, InfrastructureError> {
        debug!(to = %mask_phone_number(to), "Sending SMS via Vonage");

        let response = self
            .client
            .post(self.sms_url())
            .form(&[
                ("api_key", self.config.api_key.as_str()),
                ("api_secret", self.config.api_secret.as_str()),
                ("from", self.config.from_number.as_str()),
                ("to", vonage_destination(to)),
                ("text", body),
                ("type", "unicode"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "Vonage request failed");
            return Err(InfrastructureError::Sms(format!("Vonage returned {}", status)));
        }

        let parsed: VonageResponse = response.json().await?;
        parsed.into_message_id()
    }

    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }

    fn is_configured(&self) -> bool {
        self.config.is_complete()
    }
}
