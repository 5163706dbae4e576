//! SMS provider configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Known SMS channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProviderKind {
    Twilio,
    Vonage,
    /// Records messages instead of sending them
    Mock,
}

/// Twilio credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    #[serde(default = "default_twilio_base_url")]
    pub base_url: String,
}

impl TwilioConfig {
    pub fn is_complete(&self) -> bool {
        !self.account_sid.is_empty() && !self.auth_token.is_empty() && !self.from_number.is_empty()
    }
}

/// Vonage (formerly Nexmo) credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VonageConfig {
    pub api_key: String,
    pub api_secret: String,
    pub from_number: String,
    #[serde(default = "default_vonage_base_url")]
    pub base_url: String,
}

impl VonageConfig {
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty() && !self.from_number.is_empty()
    }
}

/// SMS dispatch configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Channels in the order they are tried
    #[serde(default = "default_channels")]
    pub channels: Vec<SmsProviderKind>,

    #[serde(default)]
    pub twilio: Option<TwilioConfig>,

    #[serde(default)]
    pub vonage: Option<VonageConfig>,

    /// Per-request timeout for provider HTTP calls, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Fall back to the mock channel in development when no provider is configured
    #[serde(default = "default_mock_in_development")]
    pub mock_in_development: bool,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            channels: default_channels(),
            twilio: None,
            vonage: None,
            request_timeout_secs: default_request_timeout(),
            mock_in_development: default_mock_in_development(),
        }
    }
}

impl SmsConfig {
    /// Fill provider credentials from the conventional `TWILIO_*` / `VONAGE_*` variables
    pub fn apply_provider_env(&mut self) {
        if let (Ok(account_sid), Ok(auth_token), Ok(from_number)) = (
            env::var("TWILIO_ACCOUNT_SID"),
            env::var("TWILIO_AUTH_TOKEN"),
            env::var("TWILIO_PHONE_NUMBER"),
        ) {
            self.twilio = Some(TwilioConfig {
                account_sid,
                auth_token,
                from_number,
                base_url: default_twilio_base_url(),
            });
        }

        if let (Ok(api_key), Ok(api_secret), Ok(from_number)) = (
            env::var("VONAGE_API_KEY"),
            env::var("VONAGE_API_SECRET"),
            env::var("VONAGE_FROM_NUMBER"),
        ) {
            self.vonage = Some(VonageConfig {
                api_key,
                api_secret,
                from_number,
                base_url: default_vonage_base_url(),
            });
        }
    }
}

fn default_channels() -> Vec<SmsProviderKind> {
    vec![SmsProviderKind::Twilio, SmsProviderKind::Vonage]
}

fn default_twilio_base_url() -> String {
    String::from("https://api.twilio.com")
}

fn default_vonage_base_url() -> String {
    String::from("https://rest.nexmo.com")
}

fn default_request_timeout() -> u64 {
    10
}

fn default_mock_in_development() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_channel_order() {
        let config = SmsConfig::default();
        assert_eq!(
            config.channels,
            vec![SmsProviderKind::Twilio, SmsProviderKind::Vonage]
        );
        assert!(config.twilio.is_none());
    }

    #[test]
    fn test_incomplete_credentials() {
        let twilio = TwilioConfig {
            account_sid: "AC123".to_string(),
            auth_token: String::new(),
            from_number: "+15550001111".to_string(),
            base_url: default_twilio_base_url(),
        };
        assert!(!twilio.is_complete());
    }

    #[test]
    fn test_channel_kind_deserialization() {
        let kinds: Vec<SmsProviderKind> = serde_json::from_str(r#"["vonage","mock"]"#).unwrap();
        assert_eq!(kinds, vec![SmsProviderKind::Vonage, SmsProviderKind::Mock]);
    }
}
