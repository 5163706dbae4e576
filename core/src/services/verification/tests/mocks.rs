//! Mock implementations for testing verification service

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use er_shared::RateLimitPolicy;

use crate::domain::entities::{AttemptRecord, RateLimitDecision, VerificationEntry};
use crate::errors::{DomainError, DomainResult, VerificationFailure};
use crate::services::dispatch::{DeliveryReport, NotificationDispatcher};
use crate::services::rate_limit::RateLimiter;
use crate::services::verification::VerificationStore;

// Mock rate limiter: records every check, denies listed keys
#[derive(Default)]
pub struct MockRateLimiter {
    pub checks: Mutex<Vec<(String, RateLimitPolicy, Option<String>)>>,
    pub denied_keys: Mutex<HashSet<String>>,
}

impl MockRateLimiter {
    pub fn deny(&self, key: &str) {
        self.denied_keys.lock().unwrap().insert(key.to_string());
    }

    pub fn checked_keys(&self) -> Vec<String> {
        self.checks.lock().unwrap().iter().map(|(k, _, _)| k.clone()).collect()
    }
}

#[async_trait]
impl RateLimiter for MockRateLimiter {
    async fn check_and_consume(
        &self,
        key: &str,
        policy: RateLimitPolicy,
        origin: Option<&str>,
    ) -> DomainResult<RateLimitDecision> {
        let mut checks = self.checks.lock().unwrap();
        checks.push((key.to_string(), policy, origin.map(str::to_string)));

        if self.denied_keys.lock().unwrap().contains(key) {
            return Ok(RateLimitDecision::Denied {
                remaining_time_ms: 42_000,
            });
        }

        let used = checks.iter().filter(|(k, _, _)| k == key).count() as u32;
        Ok(RateLimitDecision::Allowed {
            attempts_left: policy.max_attempts.saturating_sub(used),
        })
    }

    async fn attempts(&self, _key: &str) -> DomainResult<Vec<AttemptRecord>> {
        Ok(Vec::new())
    }

    async fn reset(&self, key: &str) -> DomainResult<()> {
        self.checks.lock().unwrap().retain(|(k, _, _)| k != key);
        Ok(())
    }

    async fn purge_expired(&self) -> DomainResult<usize> {
        Ok(0)
    }
}

// Mock verification store backed by a HashMap and the wall clock
pub struct MockVerificationStore {
    pub entries: Mutex<HashMap<String, VerificationEntry>>,
    pub should_fail: bool,
}

impl MockVerificationStore {
    pub fn new(should_fail: bool) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            should_fail,
        }
    }

    pub fn code_for(&self, session_id: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap()
            .get(session_id)
            .map(|e| e.code.clone())
    }
}

#[async_trait]
impl VerificationStore for MockVerificationStore {
    async fn store_verification(
        &self,
        session_id: &str,
        phone_number: &str,
        email: &str,
        expiry_minutes: u32,
    ) -> DomainResult<String> {
        if self.should_fail {
            return Err(DomainError::storage("Store unavailable"));
        }
        let entry = VerificationEntry::issue(phone_number, email, Utc::now(), expiry_minutes, 5);
        let code = entry.code.clone();
        self.entries.lock().unwrap().insert(session_id.to_string(), entry);
        Ok(code)
    }

    async fn verify_code(&self, session_id: &str, code: &str) -> DomainResult<()> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .get_mut(session_id)
            .ok_or(VerificationFailure::SessionNotFound)?;

        if let Err(failure) = entry.check(code, Utc::now()) {
            if failure.invalidates_entry() {
                entries.remove(session_id);
            }
            return Err(failure.into());
        }
        Ok(())
    }

    async fn get_verification(&self, session_id: &str) -> DomainResult<Option<VerificationEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(session_id)
            .filter(|e| !e.is_expired(Utc::now()))
            .cloned())
    }

    async fn delete_verification(&self, session_id: &str) -> DomainResult<bool> {
        Ok(self.entries.lock().unwrap().remove(session_id).is_some())
    }

    async fn purge_expired(&self) -> DomainResult<usize> {
        Ok(0)
    }
}

// Mock dispatcher recording every message
pub struct MockDispatcher {
    pub sent_messages: Mutex<Vec<(String, String)>>,
    pub should_fail: bool,
}

impl MockDispatcher {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_messages: Mutex::new(Vec::new()),
            should_fail,
        }
    }

    pub fn last_message(&self) -> Option<(String, String)> {
        self.sent_messages.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl NotificationDispatcher for MockDispatcher {
    async fn send(&self, destination: &str, body: &str) -> DeliveryReport {
        if self.should_fail {
            return DeliveryReport::failed("twilio: connection refused; vonage: 401 Unauthorized");
        }
        self.sent_messages
            .lock()
            .unwrap()
            .push((destination.to_string(), body.to_string()));
        DeliveryReport::delivered("mock", format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }
}
