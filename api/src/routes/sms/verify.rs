use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::ApiError;
use crate::middleware::client_ip::extract_client_ip;

/// Handler for `POST /sms/verify`
///
/// Failures answer `400` with `errorCode` and, for a wrong code, the
/// remaining `attemptsLeft`. The session is rate limited independently
/// of the per-entry attempt counter.
pub async fn verify_code(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<VerifyCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    if request.validate().is_err() {
        return Err(ApiError::MissingFields);
    }

    state
        .verification
        .verify_code(&request.session_id, &request.code, &extract_client_ip(&req))
        .await?;

    Ok(HttpResponse::Ok().json(VerifyCodeResponse {
        success: true,
        message: "Phone number verified successfully".to_string(),
    }))
}
