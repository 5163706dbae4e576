//! In-process verification store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use er_core::domain::entities::VerificationEntry;
use er_core::errors::{DomainError, DomainResult, VerificationFailure};
use er_core::services::clock::Clock;
use er_core::services::verification::VerificationStore;

/// Verification entries keyed by session id in a mutex-guarded map
pub struct InMemoryVerificationStore {
    entries: Mutex<HashMap<String, VerificationEntry>>,
    clock: Arc<dyn Clock>,
    max_attempts: u32,
}

impl InMemoryVerificationStore {
    pub fn new(clock: Arc<dyn Clock>, max_attempts: u32) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            max_attempts,
        }
    }

    /// Number of entries currently held, expired or not
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

pub(crate) fn validate_issue(session_id: &str, expiry_minutes: u32) -> DomainResult<()> {
    if session_id.is_empty() {
        return Err(DomainError::validation("Session id must not be empty"));
    }
    if expiry_minutes == 0 {
        return Err(DomainError::validation("Code expiry must be positive"));
    }
    Ok(())
}

#[async_trait]
impl VerificationStore for InMemoryVerificationStore {
    async fn store_verification(
        &self,
        session_id: &str,
        phone_number: &str,
        email: &str,
        expiry_minutes: u32,
    ) -> DomainResult<String> {
        validate_issue(session_id, expiry_minutes)?;

        let entry = VerificationEntry::issue(
            phone_number,
            email,
            self.clock.now(),
            expiry_minutes,
            self.max_attempts,
        );
        let code = entry.code.clone();

        let replaced = self
            .entries
            .lock()
            .await
            .insert(session_id.to_string(), entry)
            .is_some();
        debug!(session_id, replaced, "Stored verification entry");

        Ok(code)
    }

    async fn verify_code(&self, session_id: &str, code: &str) -> DomainResult<()> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().await;

        let entry = entries
            .get_mut(session_id)
            .ok_or(VerificationFailure::SessionNotFound)?;

        match entry.check(code, now) {
            Ok(()) => Ok(()),
            Err(failure) => {
                if failure.invalidates_entry() {
                    entries.remove(session_id);
                }
                Err(failure.into())
            }
        }
    }

    async fn get_verification(&self, session_id: &str) -> DomainResult<Option<VerificationEntry>> {
        let now = self.clock.now();
        Ok(self
            .entries
            .lock()
            .await
            .get(session_id)
            .filter(|entry| !entry.is_expired(now))
            .cloned())
    }

    async fn delete_verification(&self, session_id: &str) -> DomainResult<bool> {
        Ok(self.entries.lock().await.remove(session_id).is_some())
    }

    async fn purge_expired(&self) -> DomainResult<usize> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        Ok(before - entries.len())
    }
}
