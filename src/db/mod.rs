use sqlx::postgres::{PgPool, PgPoolOptions};
use crate::config::DatabaseConfig;
use anyhow::{Context, Result};

pub use memory::*;
pub use operations::*;
pub use pool::*;

pub mod memory;
pub mod operations;
pub mod pool;

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let url = config
        .url
        .as_deref()
        .context("DATABASE_URL must be set for the postgres backend")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect(url)
        .await?;

    // Test connection
    health_check(&pool).await?;

    Ok(pool)
}
