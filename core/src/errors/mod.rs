//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{RateLimitScope, VerificationFailure};

use er_shared::phone::PhoneValidationError;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Rate limit exceeded for {scope}, retry in {remaining_time_ms} ms")]
    RateLimited {
        scope: RateLimitScope,
        remaining_time_ms: u64,
    },

    #[error(transparent)]
    Verification(#[from] VerificationFailure),

    #[error("Notification dispatch failed: {message}")]
    DispatchFailure { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }
}

impl From<PhoneValidationError> for DomainError {
    fn from(err: PhoneValidationError) -> Self {
        DomainError::validation(err.message())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
