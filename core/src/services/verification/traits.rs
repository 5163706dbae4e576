//! Verification store contract implemented by the in-memory and Redis backends

use async_trait::async_trait;

use crate::domain::entities::VerificationEntry;
use crate::errors::DomainResult;

/// Session-scoped store of issued codes.
///
/// At most one live entry exists per session id. Expiry is enforced on every
/// read, so results never depend on `purge_expired` having run.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Issue a new code for the session, replacing any previous one, and return it
    async fn store_verification(
        &self,
        session_id: &str,
        phone_number: &str,
        email: &str,
        expiry_minutes: u32,
    ) -> DomainResult<String>;

    /// Check a submitted code.
    ///
    /// Expected rejections surface as `DomainError::Verification`.
    async fn verify_code(&self, session_id: &str, code: &str) -> DomainResult<()>;

    /// Read the live entry without mutating or deleting anything
    async fn get_verification(&self, session_id: &str) -> DomainResult<Option<VerificationEntry>>;

    /// Remove the session's entry, returning whether one existed
    async fn delete_verification(&self, session_id: &str) -> DomainResult<bool>;

    /// Drop expired entries, returning how many were removed
    async fn purge_expired(&self) -> DomainResult<usize>;
}
