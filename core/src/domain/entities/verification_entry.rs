//! Issued one-time verification code bound to a signup session.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::VerificationFailure;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Wrong guesses tolerated per issued code
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default expiration time for verification codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: u32 = 5;

/// Verification state of one session
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationEntry {
    /// The 6-digit code; never logged
    pub code: String,
    pub phone_number: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
    pub attempts: u32,
    pub max_attempts: u32,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl VerificationEntry {
    /// Issue a fresh entry with a random code
    pub fn issue(
        phone_number: &str,
        email: &str,
        now: DateTime<Utc>,
        expiry_minutes: u32,
        max_attempts: u32,
    ) -> Self {
        Self::with_code(
            Self::generate_code(),
            phone_number,
            email,
            now,
            expiry_minutes,
            max_attempts,
        )
    }

    /// Build an entry around a known code
    pub fn with_code(
        code: String,
        phone_number: &str,
        email: &str,
        now: DateTime<Utc>,
        expiry_minutes: u32,
        max_attempts: u32,
    ) -> Self {
        Self {
            code,
            phone_number: phone_number.to_string(),
            email: email.to_string(),
            expires_at: now
                .checked_add_signed(Duration::minutes(i64::from(expiry_minutes)))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            attempts: 0,
            max_attempts,
            verified: false,
            created_at: now,
        }
    }

    /// Uniform code in `[100000, 999999]` drawn from the OS CSPRNG
    pub fn generate_code() -> String {
        OsRng.gen_range(100_000u32..=999_999).to_string()
    }

    /// Expired strictly after `expires_at`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn attempts_left(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts)
    }

    /// Time-to-live in milliseconds, never negative
    pub fn ttl_ms(&self, now: DateTime<Utc>) -> u64 {
        (self.expires_at - now).num_milliseconds().max(0) as u64
    }

    /// Check a submitted code, updating attempts and the verified flag.
    ///
    /// Checks run in order: expiry, prior success, attempt budget, code match.
    /// When the returned failure `invalidates_entry()`, the caller must drop the
    /// entry instead of saving it back.
    pub fn check(&mut self, submitted: &str, now: DateTime<Utc>) -> Result<(), VerificationFailure> {
        if self.is_expired(now) {
            return Err(VerificationFailure::CodeExpired);
        }

        if self.verified {
            return Err(VerificationFailure::CodeAlreadyUsed);
        }

        self.attempts += 1;
        if self.attempts > self.max_attempts {
            return Err(VerificationFailure::TooManyAttempts);
        }

        if !constant_time_eq(self.code.as_bytes(), submitted.as_bytes()) {
            return Err(VerificationFailure::InvalidCode {
                attempts_left: self.attempts_left(),
            });
        }

        self.verified = true;
        Ok(())
    }
}

impl fmt::Debug for VerificationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationEntry")
            .field("code", &"******")
            .field("phone_number", &er_shared::phone::mask_phone_number(&self.phone_number))
            .field("email", &self.email)
            .field("expires_at", &self.expires_at)
            .field("attempts", &self.attempts)
            .field("max_attempts", &self.max_attempts)
            .field("verified", &self.verified)
            .field("created_at", &self.created_at)
            .finish()
    }
}
