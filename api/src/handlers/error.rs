//! Mapping of domain errors onto HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;
use tracing::error;

use er_core::errors::{DomainError, RateLimitScope};

use crate::dto::ErrorResponse;

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const SMS_SEND_FAILED: &str = "Failed to send SMS. Please try again.";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Handler error wrapping a `DomainError`
#[derive(Debug)]
pub enum ApiError {
    MissingFields,
    Domain(DomainError),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingFields => f.write_str(MISSING_FIELDS),
            ApiError::Domain(err) => write!(f, "{}", err),
        }
    }
}

/// Whole minutes until retry, rounded up
fn minutes_until(remaining_time_ms: u64) -> u64 {
    (remaining_time_ms + 59_999) / 60_000
}

fn rate_limit_message(scope: RateLimitScope, remaining_time_ms: u64) -> String {
    match scope {
        RateLimitScope::Phone => format!(
            "Too many SMS attempts. Try again in {} minute(s).",
            minutes_until(remaining_time_ms)
        ),
        RateLimitScope::Ip => "Too many requests from this IP address.".to_string(),
        RateLimitScope::Session => format!(
            "Too many verification attempts. Try again in {} minute(s).",
            minutes_until(remaining_time_ms)
        ),
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFields => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) => match err {
                DomainError::Validation { .. } | DomainError::Verification(_) => {
                    StatusCode::BAD_REQUEST
                }
                DomainError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
                DomainError::DispatchFailure { .. }
                | DomainError::Storage { .. }
                | DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::MissingFields => ErrorResponse::new(MISSING_FIELDS),
            ApiError::Domain(err) => match err {
                DomainError::Validation { message } => ErrorResponse::new(message.clone()),
                DomainError::RateLimited {
                    scope,
                    remaining_time_ms,
                } => ErrorResponse::new(rate_limit_message(*scope, *remaining_time_ms))
                    .with_remaining_time(*remaining_time_ms),
                DomainError::Verification(failure) => ErrorResponse::new(failure.to_string())
                    .with_error_code(failure.error_code(), failure.attempts_left()),
                DomainError::DispatchFailure { .. } => ErrorResponse::new(SMS_SEND_FAILED),
                DomainError::Storage { message } | DomainError::Internal { message } => {
                    error!(error = %message, "Request failed");
                    ErrorResponse::new(INTERNAL_ERROR)
                }
            },
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
