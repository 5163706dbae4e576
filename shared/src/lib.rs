//! Shared utilities and common types for the EscrowReno server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and the layered configuration loader
//! - Language selection for outbound messages
//! - Phone number utilities (country resolution, validation, masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheBackend, CacheConfig, CorsConfig, Environment, LogFormat, LoggingConfig,
    RateLimitConfig, RateLimitPolicy, ServerConfig, SmsConfig, SmsProviderKind,
    VerificationConfig,
};
pub use types::Language;
pub use utils::phone;
