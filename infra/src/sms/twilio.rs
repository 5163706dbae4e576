//! Twilio SMS channel
//!
//! Sends through the Programmable Messaging REST API: a form-encoded POST to
//! `/2010-04-01/Accounts/{sid}/Messages.json` authenticated with the account
//! SID and auth token.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

use er_shared::phone::mask_phone_number;
use er_shared::config::TwilioConfig;

use crate::sms::sms_service::SmsService;
use crate::InfrastructureError;

pub const PROVIDER_NAME: &str = "Twilio";

#[derive(Debug, Deserialize)]
struct TwilioMessage {
    sid: String,
}

#[derive(Debug, Default, Deserialize)]
struct TwilioErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

pub struct TwilioSmsService {
    client: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    pub fn new(config: TwilioConfig, request_timeout: Duration) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self { client, config })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, InfrastructureError> {
        debug!(to = %mask_phone_number(to), "Sending SMS via Twilio");

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", to),
                ("From", self.config.from_number.as_str()),
                ("Body", body),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let message: TwilioMessage = response.json().await?;
            return Ok(message.sid);
        }

        let body: TwilioErrorBody = response.json().await.unwrap_or_default();
        error!(
            status = status.as_u16(),
            code = ?body.code,
            "Twilio rejected SMS"
        );
        Err(InfrastructureError::Sms(format!(
            "Twilio returned {}: {}",
            status, body.message
        )))
    }

    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }

    fn is_configured(&self) -> bool {
        self.config.is_complete()
    }
}
