//! Verification code configuration

use serde::{Deserialize, Serialize};

/// Lifetime and attempt limits of issued codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes before an issued code expires
    #[serde(default = "default_code_expiry_minutes")]
    pub code_expiry_minutes: u32,

    /// Wrong guesses tolerated per issued code
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Interval between sweeps of expired entries, in seconds
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiry_minutes: default_code_expiry_minutes(),
            max_attempts: default_max_attempts(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

fn default_code_expiry_minutes() -> u32 {
    5
}

fn default_max_attempts() -> u32 {
    5
}

fn default_cleanup_interval() -> u64 {
    120
}
