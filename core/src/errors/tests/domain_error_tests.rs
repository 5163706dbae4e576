//! Unit tests for domain error types

use er_shared::phone::PhoneValidationError;

use crate::errors::{DomainError, RateLimitScope, VerificationFailure};

#[test]
fn test_failure_messages() {
    assert_eq!(
        VerificationFailure::SessionNotFound.to_string(),
        "Verification session not found"
    );
    assert_eq!(VerificationFailure::CodeExpired.to_string(), "Verification code expired");
    assert_eq!(VerificationFailure::CodeAlreadyUsed.to_string(), "Code already used");
    assert_eq!(VerificationFailure::TooManyAttempts.to_string(), "Too many attempts");
    assert_eq!(
        VerificationFailure::InvalidCode { attempts_left: 3 }.to_string(),
        "Invalid code"
    );
}

#[test]
fn test_failure_codes_and_attempts() {
    let failure = VerificationFailure::InvalidCode { attempts_left: 2 };
    assert_eq!(failure.error_code(), "InvalidCode");
    assert_eq!(failure.attempts_left(), Some(2));
    assert_eq!(VerificationFailure::CodeAlreadyUsed.error_code(), "CodeAlreadyUsed");
    assert_eq!(VerificationFailure::CodeExpired.attempts_left(), None);
}

#[test]
fn test_which_failures_invalidate_entry() {
    assert!(VerificationFailure::CodeExpired.invalidates_entry());
    assert!(VerificationFailure::TooManyAttempts.invalidates_entry());
    assert!(VerificationFailure::InvalidCode { attempts_left: 0 }.invalidates_entry());
    assert!(!VerificationFailure::InvalidCode { attempts_left: 1 }.invalidates_entry());
    assert!(!VerificationFailure::CodeAlreadyUsed.invalidates_entry());
    assert!(!VerificationFailure::SessionNotFound.invalidates_entry());
}

#[test]
fn test_verification_bridge() {
    let err: DomainError = VerificationFailure::CodeExpired.into();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationFailure::CodeExpired)
    ));
    assert_eq!(err.to_string(), "Verification code expired");
}

#[test]
fn test_phone_validation_bridge() {
    let err: DomainError = PhoneValidationError::InvalidFormat.into();
    match err {
        DomainError::Validation { message } => assert_eq!(message, "Invalid phone number format"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_rate_limited_display() {
    let err = DomainError::RateLimited {
        scope: RateLimitScope::Ip,
        remaining_time_ms: 1200,
    };
    assert_eq!(err.to_string(), "Rate limit exceeded for ip, retry in 1200 ms");
}
