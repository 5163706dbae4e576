//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for EscrowReno. It provides
//! concrete implementations of the storage and dispatch contracts defined in
//! `er_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: in-memory and Redis rate limiters and verification stores
//! - **SMS**: Twilio and Vonage channels, a development mock, and the
//!   failover dispatcher trying them in order
//!
//! ## Features
//!
//! - `redis-cache`: Enable the Redis store backend (default)

use er_core::errors::DomainError;

/// Cache module - rate-limit windows and verification entries
pub mod cache;

/// SMS service module - External SMS providers
pub mod sms;

pub use cache::{build_stores, Stores};
pub use sms::{create_dispatcher, FailoverSmsService};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stored entry could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS provider rejected or failed a message
    #[error("SMS service error: {0}")]
    Sms(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            #[cfg(feature = "redis-cache")]
            InfrastructureError::Cache(e) => DomainError::storage(e.to_string()),
            InfrastructureError::Serialization(e) => DomainError::storage(e.to_string()),
            other => DomainError::internal(other.to_string()),
        }
    }
}
