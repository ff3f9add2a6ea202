use anyhow::{anyhow, bail, Context, Result};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub run_migrations: bool,
}

/// Where job documents are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    /// Process-local store, lost on restart. Meant for development and tests.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("unknown storage backend: {}", other)),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let backend: StorageBackend = var("STORAGE_BACKEND", "postgres").parse()?;
        let url = lookup("DATABASE_URL");
        if backend == StorageBackend::Postgres && url.is_none() {
            bail!("DATABASE_URL must be set when STORAGE_BACKEND is postgres");
        }

        Ok(Self {
            server: ServerConfig {
                port: var("PORT", "3000")
                    .parse()
                    .context("PORT must be a valid port number")?,
                host: var("HOST", "0.0.0.0"),
                cors_allowed_origins: var("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
            database: DatabaseConfig {
                backend,
                url,
                max_connections: var("DB_MAX_CONNECTIONS", "10")
                    .parse()
                    .context("DB_MAX_CONNECTIONS must be an integer")?,
                min_connections: var("DB_MIN_CONNECTIONS", "1")
                    .parse()
                    .context("DB_MIN_CONNECTIONS must be an integer")?,
                run_migrations: var("RUN_MIGRATIONS", "true")
                    .parse()
                    .context("RUN_MIGRATIONS must be true or false")?,
            },
        })
    }
}
