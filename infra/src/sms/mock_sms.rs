//! Development SMS channel recording messages instead of sending them

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use er_shared::phone::mask_phone_number;

use crate::sms::sms_service::SmsService;
use crate::InfrastructureError;

/// A message captured by the mock channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub to: String,
    pub body: String,
    pub message_id: String,
}

pub struct MockSmsService {
    name: String,
    sent: Mutex<Vec<SentSms>>,
    failing: AtomicBool,
}

impl MockSmsService {
    pub fn new() -> Self {
        Self::named("mock")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sent: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// A channel whose sends all fail until `set_failing(false)`
    pub fn failing(name: impl Into<String>) -> Self {
        let service = Self::named(name);
        service.set_failing(true);
        service
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent_messages(&self) -> Vec<SentSms> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn message_count(&self) -> usize {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Most recent message sent to `to`
    pub fn last_message_to(&self, to: &str) -> Option<SentSms> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .rev()
            .find(|m| m.to == to)
            .cloned()
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, InfrastructureError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(InfrastructureError::Sms(format!("{} is unavailable", self.name)));
        }

        let message_id = format!("mock-msg-{}", Uuid::new_v4());
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SentSms {
                to: to.to_string(),
                body: body.to_string(),
                message_id: message_id.clone(),
            });

        info!(
            provider = %self.name,
            to = %mask_phone_number(to),
            message_id = %message_id,
            "Mock SMS recorded"
        );
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        &self.name
    }

    fn is_configured(&self) -> bool {
        true
    }
}
