//! Fixed-window rate limiting
//!
//! Keys are opaque strings; callers compose several checks (per phone, per
//! IP, per session) by calling the limiter once per key.

mod traits;

pub use traits::RateLimiter;

use er_shared::RateLimitPolicy;

use crate::errors::{DomainError, DomainResult};

/// Reject checks that can never be satisfied or identify nothing
pub fn validate_check(key: &str, policy: &RateLimitPolicy) -> DomainResult<()> {
    if key.is_empty() {
        return Err(DomainError::validation("Rate limit key must not be empty"));
    }
    if policy.max_attempts == 0 {
        return Err(DomainError::validation("Rate limit max_attempts must be positive"));
    }
    if policy.window_ms == 0 {
        return Err(DomainError::validation("Rate limit window must be positive"));
    }
    Ok(())
}

/// Key throttling send-code per destination number
pub fn phone_key(phone_number: &str) -> String {
    format!("sms_phone_{}", phone_number)
}

/// Key throttling send-code per client address
pub fn ip_key(client_ip: &str) -> String {
    format!("sms_ip_{}", client_ip)
}

/// Key throttling verify-code per session
pub fn verify_key(session_id: &str) -> String {
    format!("sms_verify_{}", session_id)
}
