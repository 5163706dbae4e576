//! Domain entities representing core business objects.

pub mod rate_limit_entry;
pub mod verification_entry;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use rate_limit_entry::{AttemptRecord, RateLimitDecision, RateLimitEntry};
pub use verification_entry::{
    VerificationEntry, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, DEFAULT_MAX_ATTEMPTS,
};
