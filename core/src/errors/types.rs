//! Expected failure types of the verification flow
//!
//! Each variant maps to a fixed client-facing message; the presentation layer
//! decides status codes and body layout.

use thiserror::Error;

/// Why a submitted code was not accepted
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationFailure {
    #[error("Verification session not found")]
    SessionNotFound,

    #[error("Verification code expired")]
    CodeExpired,

    #[error("Code already used")]
    CodeAlreadyUsed,

    #[error("Too many attempts")]
    TooManyAttempts,

    #[error("Invalid code")]
    InvalidCode { attempts_left: u32 },
}

impl VerificationFailure {
    /// Stable identifier exposed to clients as `errorCode`
    pub fn error_code(&self) -> &'static str {
        match self {
            VerificationFailure::SessionNotFound => "SessionNotFound",
            VerificationFailure::CodeExpired => "CodeExpired",
            VerificationFailure::CodeAlreadyUsed => "CodeAlreadyUsed",
            VerificationFailure::TooManyAttempts => "TooManyAttempts",
            VerificationFailure::InvalidCode { .. } => "InvalidCode",
        }
    }

    pub fn attempts_left(&self) -> Option<u32> {
        match self {
            VerificationFailure::InvalidCode { attempts_left } => Some(*attempts_left),
            _ => None,
        }
    }

    /// Whether the store must delete the session's entry after this failure
    pub fn invalidates_entry(&self) -> bool {
        matches!(
            self,
            VerificationFailure::CodeExpired
                | VerificationFailure::TooManyAttempts
                | VerificationFailure::InvalidCode { attempts_left: 0 }
        )
    }
}

/// Which rate-limit key denied a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitScope {
    /// `sms_phone_<phone>` on send-code
    Phone,
    /// `sms_ip_<ip>` on send-code
    Ip,
    /// `sms_verify_<session>` on verify-code
    Session,
}

impl std::fmt::Display for RateLimitScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateLimitScope::Phone => write!(f, "phone"),
            RateLimitScope::Ip => write!(f, "ip"),
            RateLimitScope::Session => write!(f, "session"),
        }
    }
}
