//! Application state and route table

use actix_web::{error::InternalError, web, HttpResponse};
use std::sync::Arc;
use tracing::debug;

use er_core::services::verification::VerificationService;

use crate::dto::ErrorResponse;
use crate::routes::{health, sms};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub verification: Arc<VerificationService>,
}

impl AppState {
    pub fn new(verification: Arc<VerificationService>) -> Self {
        Self { verification }
    }
}

/// Register every route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/sms")
                .route("/send", web::post().to(sms::send_code))
                .route("/verify", web::post().to(sms::verify_code)),
        );
}

/// JSON extractor settings; malformed bodies become `400 {success:false, error}`
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            debug!(error = %err, "Rejected request body");
            let response = HttpResponse::BadRequest().json(ErrorResponse::new("Invalid request body"));
            InternalError::from_response(err, response).into()
        })
}
