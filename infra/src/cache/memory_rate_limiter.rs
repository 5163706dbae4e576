//! In-process fixed-window rate limiter

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use er_core::domain::entities::{AttemptRecord, RateLimitDecision, RateLimitEntry};
use er_core::errors::DomainResult;
use er_core::services::clock::Clock;
use er_core::services::rate_limit::{validate_check, RateLimiter};
use er_shared::RateLimitPolicy;

/// Rate limiter keeping every window in a mutex-guarded map.
///
/// Each check runs inside a single critical section, so concurrent requests
/// for the same key never admit more than `max_attempts`.
pub struct InMemoryRateLimiter {
    entries: Mutex<HashMap<String, RateLimitEntry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRateLimiter {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Number of keys currently held, expired or not
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check_and_consume(
        &self,
        key: &str,
        policy: RateLimitPolicy,
        origin: Option<&str>,
    ) -> DomainResult<RateLimitDecision> {
        validate_check(key, &policy)?;

        let now = self.clock.now();
        let mut entries = self.entries.lock().await;
        let current = entries.remove(key);
        let (entry, decision) = RateLimitEntry::admit(current, &policy, now, origin);
        entries.insert(key.to_string(), entry);

        if let RateLimitDecision::Denied { remaining_time_ms } = decision {
            debug!(remaining_time_ms, event = "rate_limit_denied", "Window exhausted");
        }

        Ok(decision)
    }

    async fn attempts(&self, key: &str) -> DomainResult<Vec<AttemptRecord>> {
        let now = self.clock.now();
        let entries = self.entries.lock().await;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.attempt_log.clone())
            .unwrap_or_default())
    }

    async fn reset(&self, key: &str) -> DomainResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn purge_expired(&self) -> DomainResult<usize> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        Ok(before - entries.len())
    }
}
