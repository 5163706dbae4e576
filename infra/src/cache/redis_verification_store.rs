//! Redis-backed verification store

use async_trait::async_trait;
use redis::AsyncCommands;
use std::sync::Arc;
use tracing::debug;

use er_core::domain::entities::VerificationEntry;
use er_core::errors::{DomainError, DomainResult, VerificationFailure};
use er_core::services::clock::Clock;
use er_core::services::verification::VerificationStore;

use super::memory_verification_store::validate_issue;
use super::redis_client::{RedisClient, MAX_TRANSACTION_RETRIES};
use crate::InfrastructureError;

const NAMESPACE: &str = "verification";

type CheckOutcome = Result<(), VerificationFailure>;

/// Verification entries stored as JSON per session, expiring with the code
pub struct RedisVerificationStore {
    redis: RedisClient,
    clock: Arc<dyn Clock>,
    max_attempts: u32,
}

impl RedisVerificationStore {
    pub fn new(redis: RedisClient, clock: Arc<dyn Clock>, max_attempts: u32) -> Self {
        Self {
            redis,
            clock,
            max_attempts,
        }
    }

    async fn unwatch(conn: &mut redis::aio::Connection) -> Result<(), InfrastructureError> {
        redis::cmd("UNWATCH").query_async::<_, ()>(conn).await?;
        Ok(())
    }

    /// Run the entry check inside a WATCH transaction; `None` when retries ran out
    async fn check(
        &self,
        session_id: &str,
        code: &str,
    ) -> Result<Option<CheckOutcome>, InfrastructureError> {
        let key = self.redis.key(NAMESPACE, session_id);
        let mut conn = self.redis.dedicated().await?;

        for _ in 0..MAX_TRANSACTION_RETRIES {
            redis::cmd("WATCH")
                .arg(&key)
                .query_async::<_, ()>(&mut conn)
                .await?;

            let raw: Option<String> = conn.get(&key).await?;
            let Some(json) = raw else {
                Self::unwatch(&mut conn).await?;
                return Ok(Some(Err(VerificationFailure::SessionNotFound)));
            };

            let mut entry: VerificationEntry = serde_json::from_str(&json)?;
            let now = self.clock.now();
            let outcome = entry.check(code, now);

            let mut pipe = redis::pipe();
            pipe.atomic();
            match outcome {
                Err(failure) if failure.invalidates_entry() => {
                    pipe.cmd("DEL").arg(&key).ignore();
                }
                Err(VerificationFailure::CodeAlreadyUsed) => {
                    Self::unwatch(&mut conn).await?;
                    return Ok(Some(outcome));
                }
                _ => {
                    pipe.cmd("SET")
                        .arg(&key)
                        .arg(serde_json::to_string(&entry)?)
                        .arg("PX")
                        .arg(entry.ttl_ms(now) + 1)
                        .ignore();
                }
            }

            let committed: Option<()> = pipe.query_async(&mut conn).await?;
            if committed.is_some() {
                return Ok(Some(outcome));
            }
        }

        Ok(None)
    }
}

#[async_trait]
impl VerificationStore for RedisVerificationStore {
    async fn store_verification(
        &self,
        session_id: &str,
        phone_number: &str,
        email: &str,
        expiry_minutes: u32,
    ) -> DomainResult<String> {
        validate_issue(session_id, expiry_minutes)?;

        let now = self.clock.now();
        let entry = VerificationEntry::issue(phone_number, email, now, expiry_minutes, self.max_attempts);
        let json = serde_json::to_string(&entry).map_err(InfrastructureError::from)?;

        let mut conn = self.redis.multiplexed().await?;
        let _: () = redis::cmd("SET")
            .arg(self.redis.key(NAMESPACE, session_id))
            .arg(json)
            .arg("PX")
            .arg(entry.ttl_ms(now) + 1)
            .query_async(&mut conn)
            .await
            .map_err(InfrastructureError::from)?;

        debug!(session_id, "Stored verification entry in Redis");
        Ok(entry.code)
    }

    async fn verify_code(&self, session_id: &str, code: &str) -> DomainResult<()> {
        let outcome = self
            .check(session_id, code)
            .await?
            .ok_or_else(|| DomainError::storage("Verification entry is under heavy contention"))?;
        outcome.map_err(DomainError::from)
    }

    async fn get_verification(&self, session_id: &str) -> DomainResult<Option<VerificationEntry>> {
        let mut conn = self.redis.multiplexed().await?;
        let raw: Option<String> = conn
            .get(self.redis.key(NAMESPACE, session_id))
            .await
            .map_err(InfrastructureError::from)?;

        let now = self.clock.now();
        match raw {
            Some(json) => {
                let entry: VerificationEntry =
                    serde_json::from_str(&json).map_err(InfrastructureError::from)?;
                Ok((!entry.is_expired(now)).then_some(entry))
            }
            None => Ok(None),
        }
    }

    async fn delete_verification(&self, session_id: &str) -> DomainResult<bool> {
        let mut conn = self.redis.multiplexed().await?;
        let removed: i64 = conn
            .del(self.redis.key(NAMESPACE, session_id))
            .await
            .map_err(InfrastructureError::from)?;
        Ok(removed > 0)
    }

    async fn purge_expired(&self) -> DomainResult<usize> {
        // Keys carry a TTL; Redis evicts them itself
        Ok(0)
    }
}
