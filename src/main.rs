mod app_state;
mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod queries;
mod routes;

use anyhow::Context;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "squads_backend=debug,tower_http=debug".into()),
        )
        .init();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let pool = match db::connect_to_db(&config.database) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Error connecting to database: {:#}", e);
            std::process::exit(1);
        }
    };

    let state = app_state::AppState { db_pool: pool };
    let app = routes::create_routes().with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("squads backend listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
