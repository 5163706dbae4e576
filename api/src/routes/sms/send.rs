use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use er_core::services::verification::SendCodeCommand;
use er_shared::Language;

use crate::app::AppState;
use crate::dto::{SendCodeRequest, SendCodeResponse};
use crate::handlers::ApiError;
use crate::middleware::client_ip::extract_client_ip;

/// Handler for `POST /sms/send`
///
/// # Request Body
///
/// ```json
/// {
///     "phoneNumber": "+351912345678",
///     "email": "owner@example.com",
///     "sessionId": "signup-7f3a",
///     "language": "pt"
/// }
/// ```
///
/// # Responses
///
/// - `200` `{success, provider, messageId, attemptsLeft}`
/// - `400` missing fields or an invalid phone number
/// - `429` phone or IP rate limit, with `remainingTime` in milliseconds
/// - `500` every SMS channel failed
pub async fn send_code(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<SendCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    if request.validate().is_err() {
        return Err(ApiError::MissingFields);
    }

    let command = SendCodeCommand {
        language: Language::from_code_or_default(request.language.as_deref()),
        phone_number: request.phone_number,
        email: request.email,
        session_id: request.session_id,
        client_ip: extract_client_ip(&req),
    };

    let result = state.verification.send_code(command).await?;

    Ok(HttpResponse::Ok().json(SendCodeResponse {
        success: true,
        provider: result.provider,
        message_id: result.message_id,
        attempts_left: result.attempts_left,
    }))
}
