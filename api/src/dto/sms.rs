//! Request and response bodies for the `/sms` endpoints

use serde::{Deserialize, Serialize};
use validator::Validate;

/// `POST /sms/send`
///
/// Absent fields deserialize as empty strings so that they fail validation
/// with the same message as empty ones.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub phone_number: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub session_id: String,

    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeResponse {
    pub success: bool,
    pub provider: String,
    pub message_id: Option<String>,
    pub attempts_left: u32,
}

/// `POST /sms/verify`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub session_id: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyCodeResponse {
    pub success: bool,
    pub message: String,
}
