//! Projects API - REST server over Postgres

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use database::postgres;
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL at {}", config.database.redacted_url());

    let retry = RetryConfig::new()
        .with_max_retries(5)
        .with_initial_delay(Duration::from_millis(500));
    let db = postgres::connect_from_config_with_retry(&config.database, Some(retry)).await?;

    postgres::run_migrations::<Migrator>(&db, config.app.name).await?;

    let state = AppState {
        config: config.clone(),
        db,
    };

    // Build REST router; health endpoints share the middleware stack
    let api_routes = api::routes(&state);
    let health_routes = health_router(state.config.app).merge(api::health::router(state.db.clone()));
    let app = axum_helpers::create_router::<openapi::ApiDoc>(
        api_routes,
        health_routes,
        &state.config.server,
    )?;

    info!(
        "Starting Projects API on {}",
        state.config.server.address()
    );

    let db = state.db.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing PostgreSQL pool");
            if let Err(e) = db.close().await {
                tracing::warn!(error = %e, "Failed to close PostgreSQL pool cleanly");
            }
            info!("PostgreSQL pool closed");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Projects API shutdown complete");
    Ok(())
}
