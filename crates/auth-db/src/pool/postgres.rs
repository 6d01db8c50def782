//! PostgreSQL connection pool management

use auth_common::DatabaseConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

/// Bundled `users` schema; every statement is idempotent
pub const SCHEMA_SQL: &str = include_str!("../../migrations/0001_create_users.sql");

/// Create a new PostgreSQL connection pool
#[instrument(skip(config), fields(max_connections = config.max_connections))]
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.url)
        .await?;

    info!("database pool ready");
    Ok(pool)
}

/// Apply the bundled schema to the database
///
/// Safe to run repeatedly against an already initialized database.
#[instrument(skip(pool))]
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
    info!("users schema applied");
    Ok(())
}
