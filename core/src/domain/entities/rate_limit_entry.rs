//! Fixed-window rate-limit entry.

use chrono::{DateTime, Duration, Utc};
use er_shared::RateLimitPolicy;
use serde::{Deserialize, Serialize};

/// One admitted attempt, kept for auditing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub timestamp: DateTime<Utc>,
    pub origin: String,
}

/// Outcome of a single admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { attempts_left: u32 },
    Denied { remaining_time_ms: u64 },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }

    /// Admissions left in the window; zero once denied
    pub fn attempts_left(&self) -> u32 {
        match self {
            RateLimitDecision::Allowed { attempts_left } => *attempts_left,
            RateLimitDecision::Denied { .. } => 0,
        }
    }

    /// Milliseconds until the window resets, when denied
    pub fn remaining_time_ms(&self) -> Option<u64> {
        match self {
            RateLimitDecision::Allowed { .. } => None,
            RateLimitDecision::Denied { remaining_time_ms } => Some(*remaining_time_ms),
        }
    }
}

/// Admission count of one key inside its current window.
///
/// `count` never exceeds the policy's `max_attempts`; denied attempts are
/// neither counted nor logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitEntry {
    pub count: u32,
    pub window_reset_at: DateTime<Utc>,
    pub attempt_log: Vec<AttemptRecord>,
}

impl RateLimitEntry {
    /// Open a new window with the current attempt already counted
    pub fn open(policy: &RateLimitPolicy, now: DateTime<Utc>, origin: Option<&str>) -> Self {
        let mut entry = Self {
            count: 1,
            window_reset_at: window_end(now, policy),
            attempt_log: Vec::new(),
        };
        entry.record(now, origin);
        entry
    }

    /// The window is over strictly after `window_reset_at`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.window_reset_at
    }

    /// Milliseconds left in the window, never negative
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> u64 {
        (self.window_reset_at - now).num_milliseconds().max(0) as u64
    }

    /// Apply one attempt to the current state of a key.
    ///
    /// Returns the state to keep for the key and the decision. A missing or
    /// expired entry is replaced by a fresh window.
    pub fn admit(
        current: Option<RateLimitEntry>,
        policy: &RateLimitPolicy,
        now: DateTime<Utc>,
        origin: Option<&str>,
    ) -> (RateLimitEntry, RateLimitDecision) {
        match current {
            Some(mut entry) if !entry.is_expired(now) => {
                let decision = entry.try_consume(policy, now, origin);
                (entry, decision)
            }
            _ => {
                let entry = Self::open(policy, now, origin);
                let decision = RateLimitDecision::Allowed {
                    attempts_left: policy.max_attempts.saturating_sub(1),
                };
                (entry, decision)
            }
        }
    }

    /// Count an attempt against a live window
    fn try_consume(
        &mut self,
        policy: &RateLimitPolicy,
        now: DateTime<Utc>,
        origin: Option<&str>,
    ) -> RateLimitDecision {
        if self.count >= policy.max_attempts {
            return RateLimitDecision::Denied {
                remaining_time_ms: self.remaining_ms(now),
            };
        }

        self.count += 1;
        self.record(now, origin);
        RateLimitDecision::Allowed {
            attempts_left: policy.max_attempts - self.count,
        }
    }

    fn record(&mut self, now: DateTime<Utc>, origin: Option<&str>) {
        if let Some(origin) = origin {
            self.attempt_log.push(AttemptRecord {
                timestamp: now,
                origin: origin.to_string(),
            });
        }
    }
}

/// Window end, saturating at the latest representable instant
fn window_end(now: DateTime<Utc>, policy: &RateLimitPolicy) -> DateTime<Utc> {
    let window = Duration::milliseconds(i64::try_from(policy.window_ms).unwrap_or(i64::MAX));
    now.checked_add_signed(window)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
