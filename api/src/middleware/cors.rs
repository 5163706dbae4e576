//! CORS configuration
//!
//! Development allows any origin. Other environments only allow the origins
//! listed in `cors.allowed_origins`.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use tracing::info;

use er_shared::{CorsConfig, Environment};

pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    if environment.is_development() {
        info!("Configuring CORS for development environment");
        return Cors::default()
            .allow_any_origin()
            .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
            .max_age(config.max_age);
    }

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(config.max_age);

    for origin in config.allowed_origins.iter().map(|o| o.trim()) {
        if !origin.is_empty() {
            info!(origin, "Adding allowed origin");
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn preflight(environment: Environment, origin: &str) -> StatusCode {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.escrowreno.com".to_string()],
            max_age: 600,
        };
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config, environment))
                .route("/health", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/health")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();
        test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn test_production_allows_configured_origin() {
        assert_eq!(
            preflight(Environment::Production, "https://app.escrowreno.com").await,
            StatusCode::OK
        );
    }

    #[actix_web::test]
    async fn test_production_rejects_unknown_origin() {
        assert_ne!(
            preflight(Environment::Production, "https://evil.example").await,
            StatusCode::OK
        );
    }

    #[actix_web::test]
    async fn test_development_allows_any_origin() {
        assert_eq!(
            preflight(Environment::Development, "http://localhost:5173").await,
            StatusCode::OK
        );
    }
}
