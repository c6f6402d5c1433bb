//! Startup wiring: config checks, telemetry, database, services, routes.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use lotops_core::Config;
use std::sync::Arc;

/// Bring the application up to a ready-to-serve router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    validation::validate_config(&config).context("Invalid configuration")?;

    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    let pool = database::setup_database(&config).await?;
    let state = services::initialize_services(&config, pool);
    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
