use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

use er_api::middleware::create_cors;
use er_api::telemetry::init_tracing;
use er_api::{configure, json_config, AppState};
use er_core::services::clock::SystemClock;
use er_core::services::verification::{VerificationService, VerificationServiceConfig};
use er_infra::{build_stores, create_dispatcher};
use er_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        cache_backend = ?config.cache.backend,
        "Starting EscrowReno verification server"
    );

    let stores = build_stores(&config, Arc::new(SystemClock))
        .await
        .context("Failed to initialize stores")?;
    let dispatcher = create_dispatcher(&config.sms, config.environment)
        .context("Failed to initialize SMS dispatch")?;
    let cleanup_tasks = stores.spawn_cleanup(&config);

    let verification = Arc::new(VerificationService::new(
        stores.rate_limiter.clone(),
        stores.verification_store.clone(),
        Arc::new(dispatcher),
        VerificationServiceConfig::from(&config),
    ));
    let state = web::Data::new(AppState::new(verification));

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let server_config = config.clone();
    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(json_config(server_config.server.max_payload_size))
            .wrap(create_cors(&server_config.cors, server_config.environment))
            .wrap(TracingLogger::default())
            .configure(configure)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    for task in cleanup_tasks {
        task.shutdown();
    }
    info!("Server stopped");

    Ok(())
}
