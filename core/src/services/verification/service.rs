//! Main verification service implementation

use std::sync::Arc;
use tracing::{error, info, warn};

use er_shared::phone::{format_for_delivery, mask_phone_number, validate_phone_number};
use er_shared::RateLimitPolicy;

use crate::domain::entities::RateLimitDecision;
use crate::errors::{DomainError, DomainResult, RateLimitScope, VerificationFailure};
use crate::services::dispatch::{verification_message, NotificationDispatcher};
use crate::services::rate_limit::{self, RateLimiter};

use super::config::VerificationServiceConfig;
use super::traits::VerificationStore;
use super::types::{SendCodeCommand, SendCodeResult, VerifiedIdentity};

/// Reported when the dispatcher gives no reason of its own
const ALL_CHANNELS_FAILED: &str = "All SMS providers failed";

/// Orchestrates rate limiting, code storage and SMS dispatch for signup
pub struct VerificationService {
    rate_limiter: Arc<dyn RateLimiter>,
    store: Arc<dyn VerificationStore>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    config: VerificationServiceConfig,
}

impl VerificationService {
    pub fn new(
        rate_limiter: Arc<dyn RateLimiter>,
        store: Arc<dyn VerificationStore>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            rate_limiter,
            store,
            dispatcher,
            config,
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue a code for a signup session and text it to the phone number
    ///
    /// This method:
    /// 1. Rate limits by phone number, then by client IP
    /// 2. Validates the phone number against its country's length rules
    /// 3. Stores a fresh code, replacing any earlier one for the session
    /// 4. Sends the localized SMS through the dispatcher
    ///
    /// The returned `attempts_left` is the phone number's remaining sends.
    pub async fn send_code(&self, command: SendCodeCommand) -> DomainResult<SendCodeResult> {
        let masked_phone = mask_phone_number(&command.phone_number);

        let phone_check = self
            .consume(
                &rate_limit::phone_key(&command.phone_number),
                self.config.send_policy,
                &command.client_ip,
                RateLimitScope::Phone,
            )
            .await?;

        self.consume(
            &rate_limit::ip_key(&command.client_ip),
            self.config.send_ip_policy,
            &command.client_ip,
            RateLimitScope::Ip,
        )
        .await?;

        if let Err(e) = validate_phone_number(&command.phone_number) {
            warn!(
                phone = %masked_phone,
                reason = %e,
                event = "invalid_phone_number",
                "Rejected phone number"
            );
            return Err(e.into());
        }

        let code = self
            .store
            .store_verification(
                &command.session_id,
                &command.phone_number,
                &command.email,
                self.config.code_expiry_minutes,
            )
            .await?;

        info!(
            phone = %masked_phone,
            session_id = %command.session_id,
            event = "otp_generated",
            "Issued verification code"
        );

        let body = verification_message(command.language, &code, self.config.code_expiry_minutes);
        let report = self
            .dispatcher
            .send(&format_for_delivery(&command.phone_number), &body)
            .await;

        if !report.delivered {
            let message = report
                .error
                .unwrap_or_else(|| ALL_CHANNELS_FAILED.to_string());
            error!(
                phone = %masked_phone,
                error = %message,
                event = "sms_send_failed",
                "SMS sending failed"
            );
            return Err(DomainError::DispatchFailure { message });
        }

        let provider = report.channel.unwrap_or_default();
        info!(
            phone = %masked_phone,
            provider = %provider,
            event = "sms_sent",
            "SMS sent successfully"
        );

        Ok(SendCodeResult {
            provider,
            message_id: report.message_id,
            attempts_left: phone_check.attempts_left(),
        })
    }

    /// Check a submitted code for a session and return the identity it binds
    pub async fn verify_code(
        &self,
        session_id: &str,
        code: &str,
        client_ip: &str,
    ) -> DomainResult<VerifiedIdentity> {
        self.consume(
            &rate_limit::verify_key(session_id),
            self.config.verify_policy,
            client_ip,
            RateLimitScope::Session,
        )
        .await?;

        if let Err(e) = self.store.verify_code(session_id, code).await {
            if let DomainError::Verification(failure) = &e {
                warn!(
                    session_id = %session_id,
                    error_code = failure.error_code(),
                    attempts_left = ?failure.attempts_left(),
                    event = "otp_verification_failed",
                    "Verification code rejected"
                );
            }
            return Err(e);
        }

        let entry = self
            .store
            .get_verification(session_id)
            .await?
            .ok_or(VerificationFailure::SessionNotFound)?;

        info!(
            phone = %mask_phone_number(&entry.phone_number),
            session_id = %session_id,
            event = "otp_verified_success",
            "Phone number verified"
        );

        Ok(VerifiedIdentity {
            session_id: session_id.to_string(),
            phone_number: entry.phone_number,
            email: entry.email,
        })
    }

    /// Consume a verified session once signup has used it
    pub async fn finalize(&self, session_id: &str) -> DomainResult<VerifiedIdentity> {
        let entry = self
            .store
            .get_verification(session_id)
            .await?
            .ok_or(VerificationFailure::SessionNotFound)?;

        if !entry.verified {
            return Err(DomainError::validation("Phone number has not been verified"));
        }

        self.store.delete_verification(session_id).await?;

        info!(
            phone = %mask_phone_number(&entry.phone_number),
            session_id = %session_id,
            event = "verification_finalized",
            "Verification session consumed"
        );

        Ok(VerifiedIdentity {
            session_id: session_id.to_string(),
            phone_number: entry.phone_number,
            email: entry.email,
        })
    }

    async fn consume(
        &self,
        key: &str,
        policy: RateLimitPolicy,
        client_ip: &str,
        scope: RateLimitScope,
    ) -> DomainResult<RateLimitDecision> {
        let decision = self
            .rate_limiter
            .check_and_consume(key, policy, Some(client_ip))
            .await?;

        if let RateLimitDecision::Denied { remaining_time_ms } = decision {
            warn!(
                scope = %scope,
                client_ip = %client_ip,
                remaining_time_ms,
                event = "rate_limit_exceeded",
                "Request rate limited"
            );
            return Err(DomainError::RateLimited {
                scope,
                remaining_time_ms,
            });
        }

        Ok(decision)
    }
}
