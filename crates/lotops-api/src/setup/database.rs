//! Postgres pool construction and startup migrations.

use anyhow::{Context, Result};
use lotops_core::Config;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::path::Path;
use std::time::Duration;

/// Connections idle longer than this are closed.
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(600);
/// Connections are recycled after this lifetime regardless of use.
const POOL_MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Migrations live at the workspace root, two levels up from this crate.
const MIGRATIONS_DIR: &str = "../../migrations";

/// Build the connection pool and bring the schema up to date.
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections())
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds()))
        .idle_timeout(POOL_IDLE_TIMEOUT)
        .max_lifetime(POOL_MAX_LIFETIME)
        .connect(config.database_url())
        .await
        .context("Failed to connect to Postgres")?;

    tracing::info!(
        max_connections = config.db_max_connections(),
        acquire_timeout_seconds = config.db_timeout_seconds(),
        "Database pool ready"
    );

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Apply pending migrations before the server starts taking traffic.
async fn run_migrations(pool: &PgPool) -> Result<()> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(MIGRATIONS_DIR);
    let migrator = Migrator::new(dir)
        .await
        .context("Failed to load migrations")?;
    migrator
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");
    Ok(())
}
