//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// A fixed-window policy: at most `max_attempts` admissions per `window_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RateLimitPolicy {
    pub max_attempts: u32,
    pub window_ms: u64,
}

impl RateLimitPolicy {
    pub const fn new(max_attempts: u32, window_ms: u64) -> Self {
        Self {
            max_attempts,
            window_ms,
        }
    }

    /// Same window, `max_attempts` scaled by `factor`
    pub fn scaled(&self, factor: u32) -> Self {
        Self {
            max_attempts: self.max_attempts.saturating_mul(factor),
            window_ms: self.window_ms,
        }
    }

    /// 3 SMS per minute per phone number
    pub const SMS_SEND: RateLimitPolicy = RateLimitPolicy::new(3, 60 * 1000);

    /// 5 verification attempts per 15 minutes per session
    pub const SMS_VERIFY: RateLimitPolicy = RateLimitPolicy::new(5, 15 * 60 * 1000);

    /// 5 signups per hour
    pub const SIGNUP: RateLimitPolicy = RateLimitPolicy::new(5, 60 * 60 * 1000);

    /// 3 emails per 5 minutes
    pub const EMAIL_SEND: RateLimitPolicy = RateLimitPolicy::new(3, 5 * 60 * 1000);
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Policy applied per phone number on send-code
    #[serde(default = "default_sms_send")]
    pub sms_send: RateLimitPolicy,

    /// Policy applied per session on verify-code
    #[serde(default = "default_sms_verify")]
    pub sms_verify: RateLimitPolicy,

    /// Policy for account creation
    #[serde(default = "default_signup")]
    pub signup: RateLimitPolicy,

    /// Policy for outbound email
    #[serde(default = "default_email_send")]
    pub email_send: RateLimitPolicy,

    /// Per-IP limit on send-code is `sms_send.max_attempts` times this
    #[serde(default = "default_ip_multiplier")]
    pub ip_multiplier: u32,

    /// Interval between sweeps of expired windows, in seconds
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            sms_send: default_sms_send(),
            sms_verify: default_sms_verify(),
            signup: default_signup(),
            email_send: default_email_send(),
            ip_multiplier: default_ip_multiplier(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

impl RateLimitConfig {
    /// Policy applied per client IP on send-code
    pub fn sms_send_per_ip(&self) -> RateLimitPolicy {
        self.sms_send.scaled(self.ip_multiplier)
    }
}

fn default_sms_send() -> RateLimitPolicy {
    RateLimitPolicy::SMS_SEND
}

fn default_sms_verify() -> RateLimitPolicy {
    RateLimitPolicy::SMS_VERIFY
}

fn default_signup() -> RateLimitPolicy {
    RateLimitPolicy::SIGNUP
}

fn default_email_send() -> RateLimitPolicy {
    RateLimitPolicy::EMAIL_SEND
}

fn default_ip_multiplier() -> u32 {
    2
}

fn default_cleanup_interval() -> u64 {
    300
}
