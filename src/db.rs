use anyhow::{Context, Ok, Result};
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};

use crate::config::DatabaseConfig;

/// Builds the shared pool. Connections are opened on first use.
pub fn connect_to_db(config: &DatabaseConfig) -> Result<MySqlPool> {
    let db_url = config.url()?;
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy(db_url.as_str())
        .context("Failed to create database pool")?;

    tracing::info!(
        host = %config.host,
        database = %config.name,
        max_connections = config.max_connections,
        "database pool configured"
    );
    Ok(pool)
}
