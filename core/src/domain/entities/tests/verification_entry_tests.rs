//! Unit tests for the verification entry

use chrono::{Duration, TimeZone, Utc};

use crate::domain::entities::verification_entry::{
    VerificationEntry, CODE_LENGTH, DEFAULT_MAX_ATTEMPTS,
};
use crate::errors::VerificationFailure;

fn issued_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn entry(code: &str) -> VerificationEntry {
    VerificationEntry::with_code(code.to_string(), "+351912345678", "a@b.pt", issued_at(), 5, 5)
}

#[test]
fn test_generate_code_format() {
    for _ in 0..200 {
        let code = VerificationEntry::generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
        let num: u32 = code.parse().expect("code should be numeric");
        assert!((100_000..=999_999).contains(&num));
    }
}

#[test]
fn test_issue_sets_expiry_and_counters() {
    let issued = VerificationEntry::issue("+351912345678", "a@b.pt", issued_at(), 5, 5);
    assert_eq!(issued.expires_at, issued_at() + Duration::minutes(5));
    assert_eq!(issued.attempts, 0);
    assert!(!issued.verified);
    assert_eq!(issued.attempts_left(), 5);
}

#[test]
fn test_correct_code_verifies_once() {
    let mut entry = entry("123456");
    assert!(entry.check("123456", issued_at()).is_ok());
    assert!(entry.verified);
    assert_eq!(entry.attempts, 1);

    assert_eq!(
        entry.check("123456", issued_at()),
        Err(VerificationFailure::CodeAlreadyUsed)
    );
    assert_eq!(entry.attempts, 1);
}

#[test]
fn test_wrong_code_counts_down() {
    let mut entry = entry("123456");
    for expected_left in (0..5).rev() {
        assert_eq!(
            entry.check("000000", issued_at()),
            Err(VerificationFailure::InvalidCode { attempts_left: expected_left })
        );
    }
    assert_eq!(
        entry.check("123456", issued_at()),
        Err(VerificationFailure::TooManyAttempts)
    );
}

#[test]
fn test_expiry_boundary() {
    let expires_at = issued_at() + Duration::minutes(5);

    let mut before = entry("123456");
    assert!(before.check("123456", expires_at - Duration::milliseconds(1)).is_ok());

    let mut after = entry("123456");
    assert_eq!(
        after.check("123456", expires_at + Duration::milliseconds(1)),
        Err(VerificationFailure::CodeExpired)
    );
    assert_eq!(after.attempts, 0);
}

#[test]
fn test_expiry_checked_before_verified_flag() {
    let mut entry = entry("123456");
    entry.check("123456", issued_at()).unwrap();
    assert_eq!(
        entry.check("123456", issued_at() + Duration::minutes(6)),
        Err(VerificationFailure::CodeExpired)
    );
}

#[test]
fn test_debug_redacts_code() {
    let entry = entry("987654");
    let rendered = format!("{:?}", entry);
    assert!(!rendered.contains("987654"));
    assert!(!rendered.contains("912345678"));
    assert!(rendered.contains("******"));
}

#[test]
fn test_ttl_never_negative() {
    let entry = entry("123456");
    assert_eq!(entry.ttl_ms(issued_at()), 300_000);
    assert_eq!(entry.ttl_ms(issued_at() + Duration::minutes(10)), 0);
}

#[test]
fn test_longest_expiry_is_representable() {
    let entry = VerificationEntry::issue(
        "+351912345678",
        "owner@example.com",
        issued_at(),
        u32::MAX,
        DEFAULT_MAX_ATTEMPTS,
    );
    assert!(entry.expires_at > issued_at());
    assert!(!entry.is_expired(issued_at() + Duration::days(365)));
}
