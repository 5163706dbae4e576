//! Signup phone verification
//!
//! This module provides the send-code / verify-code workflow:
//! - Per-phone, per-IP and per-session rate limiting
//! - Code issuance into a session-scoped store
//! - Localized SMS dispatch with channel failover
//! - Attempt-bounded, constant-time code verification

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::VerificationStore;
pub use types::{SendCodeCommand, SendCodeResult, VerifiedIdentity};
