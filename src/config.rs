use anyhow::{anyhow, Context, Result};
use std::{net::SocketAddr, time::Duration};
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    /// `host` or `host:port`
    pub host: String,
    pub name: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Config {
    /// Loads `.env` when present, then reads the process environment.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(e).context("Failed to load .env file");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| anyhow!("{} must be set", key));

        let bind_addr = lookup("SQUADS_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("SQUADS_BIND_ADDR must be a socket address")?;

        let max_connections = match lookup("DOPAMINE_DB_MAX_CONNECTIONS") {
            Some(v) => v
                .parse()
                .context("DOPAMINE_DB_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let acquire_timeout_secs = match lookup("DOPAMINE_DB_ACQUIRE_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .context("DOPAMINE_DB_ACQUIRE_TIMEOUT_SECS must be a number of seconds")?,
            None => DEFAULT_ACQUIRE_TIMEOUT_SECS,
        };

        Ok(Config {
            bind_addr,
            database: DatabaseConfig {
                user: required("DOPAMINE_DB_USER")?,
                password: required("DOPAMINE_DB_PASS")?,
                host: required("DOPAMINE_DB_HOST")?,
                name: required("DOPAMINE_DB_NAME")?,
                max_connections,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            },
        })
    }
}

impl DatabaseConfig {
    pub fn url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!("mysql://{}", self.host))
            .with_context(|| format!("Invalid database host: {}", self.host))?;
        url.set_username(&self.user)
            .map_err(|_| anyhow!("Cannot set database user"))?;
        url.set_password(Some(&self.password))
            .map_err(|_| anyhow!("Cannot set database password"))?;
        url.set_path(&format!("/{}", self.name));
        Ok(url)
    }
}
