//! Redis-backed fixed-window rate limiter

use async_trait::async_trait;
use redis::AsyncCommands;
use std::sync::Arc;

use er_core::domain::entities::{AttemptRecord, RateLimitDecision, RateLimitEntry};
use er_core::errors::{DomainError, DomainResult};
use er_core::services::clock::Clock;
use er_core::services::rate_limit::{validate_check, RateLimiter};
use er_shared::RateLimitPolicy;

use super::redis_client::{RedisClient, MAX_TRANSACTION_RETRIES};
use crate::InfrastructureError;

const NAMESPACE: &str = "ratelimit";

/// Windows stored as JSON under hashed keys, expiring with the window
pub struct RedisRateLimiter {
    redis: RedisClient,
    clock: Arc<dyn Clock>,
}

impl RedisRateLimiter {
    pub fn new(redis: RedisClient, clock: Arc<dyn Clock>) -> Self {
        Self { redis, clock }
    }

    async fn load(&self, key: &str) -> Result<Option<RateLimitEntry>, InfrastructureError> {
        let mut conn = self.redis.multiplexed().await?;
        let raw: Option<String> = conn.get(self.redis.hashed_key(NAMESPACE, key)).await?;
        Ok(match raw {
            Some(json) => Some(serde_json::from_str(&json)?),
            None => None,
        })
    }

    async fn consume(
        &self,
        key: &str,
        policy: &RateLimitPolicy,
        origin: Option<&str>,
    ) -> Result<Option<RateLimitDecision>, InfrastructureError> {
        let redis_key = self.redis.hashed_key(NAMESPACE, key);
        let mut conn = self.redis.dedicated().await?;

        for _ in 0..MAX_TRANSACTION_RETRIES {
            redis::cmd("WATCH")
                .arg(&redis_key)
                .query_async::<_, ()>(&mut conn)
                .await?;

            let raw: Option<String> = conn.get(&redis_key).await?;
            let current = match raw {
                Some(json) => Some(serde_json::from_str::<RateLimitEntry>(&json)?),
                None => None,
            };

            let now = self.clock.now();
            let (entry, decision) = RateLimitEntry::admit(current, policy, now, origin);
            // Keep the key through the reset instant itself
            let ttl_ms = entry.remaining_ms(now) + 1;

            let committed: Option<()> = redis::pipe()
                .atomic()
                .cmd("SET")
                .arg(&redis_key)
                .arg(serde_json::to_string(&entry)?)
                .arg("PX")
                .arg(ttl_ms)
                .ignore()
                .query_async(&mut conn)
                .await?;

            if committed.is_some() {
                return Ok(Some(decision));
            }
        }

        Ok(None)
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check_and_consume(
        &self,
        key: &str,
        policy: RateLimitPolicy,
        origin: Option<&str>,
    ) -> DomainResult<RateLimitDecision> {
        validate_check(key, &policy)?;

        self.consume(key, &policy, origin)
            .await?
            .ok_or_else(|| DomainError::storage("Rate limit key is under heavy contention"))
    }

    async fn attempts(&self, key: &str) -> DomainResult<Vec<AttemptRecord>> {
        let now = self.clock.now();
        Ok(self
            .load(key)
            .await?
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.attempt_log)
            .unwrap_or_default())
    }

    async fn reset(&self, key: &str) -> DomainResult<()> {
        let mut conn = self.redis.multiplexed().await.map_err(DomainError::from)?;
        let _: () = conn
            .del(self.redis.hashed_key(NAMESPACE, key))
            .await
            .map_err(InfrastructureError::from)?;
        Ok(())
    }

    async fn purge_expired(&self) -> DomainResult<usize> {
        // Keys carry a TTL; Redis evicts them itself
        Ok(0)
    }
}
