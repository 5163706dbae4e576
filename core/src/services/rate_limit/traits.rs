//! Rate limiter contract implemented by the in-memory and Redis backends

use async_trait::async_trait;
use er_shared::RateLimitPolicy;

use crate::domain::entities::{AttemptRecord, RateLimitDecision};
use crate::errors::DomainResult;

#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Count one attempt for `key` if the window allows it.
    ///
    /// `origin` is appended to the key's audit log when the attempt is admitted.
    async fn check_and_consume(
        &self,
        key: &str,
        policy: RateLimitPolicy,
        origin: Option<&str>,
    ) -> DomainResult<RateLimitDecision>;

    /// Audit log of the key's live window; empty when none
    async fn attempts(&self, key: &str) -> DomainResult<Vec<AttemptRecord>>;

    /// Forget the key entirely
    async fn reset(&self, key: &str) -> DomainResult<()>;

    /// Drop expired windows, returning how many were removed
    async fn purge_expired(&self) -> DomainResult<usize>;
}
