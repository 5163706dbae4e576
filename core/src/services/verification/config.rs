//! Configuration for the verification service

use er_shared::{AppConfig, RateLimitPolicy};

use crate::domain::entities::DEFAULT_EXPIRATION_MINUTES;

/// Policies and lifetimes applied by `VerificationService`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationServiceConfig {
    /// Send-code limit per phone number
    pub send_policy: RateLimitPolicy,
    /// Send-code limit per client IP
    pub send_ip_policy: RateLimitPolicy,
    /// Verify-code limit per session
    pub verify_policy: RateLimitPolicy,
    /// Minutes an issued code stays valid
    pub code_expiry_minutes: u32,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            send_policy: RateLimitPolicy::SMS_SEND,
            send_ip_policy: RateLimitPolicy::SMS_SEND.scaled(2),
            verify_policy: RateLimitPolicy::SMS_VERIFY,
            code_expiry_minutes: DEFAULT_EXPIRATION_MINUTES,
        }
    }
}

impl From<&AppConfig> for VerificationServiceConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            send_policy: config.rate_limit.sms_send,
            send_ip_policy: config.rate_limit.sms_send_per_ip(),
            verify_policy: config.rate_limit.sms_verify,
            code_expiry_minutes: config.verification.code_expiry_minutes,
        }
    }
}
