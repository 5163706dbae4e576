//! Inputs and results of the verification service

use er_shared::Language;
use serde::Serialize;

/// A request to text a code to a signup session's phone
#[derive(Debug, Clone)]
pub struct SendCodeCommand {
    pub phone_number: String,
    pub email: String,
    pub session_id: String,
    pub language: Language,
    pub client_ip: String,
}

/// Result of sending a verification code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendCodeResult {
    /// Channel that delivered the SMS
    pub provider: String,
    /// Provider-assigned message id, when the channel returns one
    pub message_id: Option<String>,
    /// Sends left for this phone number in the current window
    pub attempts_left: u32,
}

/// Phone and email bound to a verified session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedIdentity {
    pub session_id: String,
    pub phone_number: String,
    pub email: String,
}
