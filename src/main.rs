use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use job_board::{
    config::{Config, StorageBackend},
    db::{InMemoryJobStore, JobStore, PgJobStore},
    routes::create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "job_board=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    let jobs: Arc<dyn JobStore> = match config.database.backend {
        StorageBackend::Postgres => {
            let pool = job_board::db::create_pool(&config.database).await?;

            if config.database.run_migrations {
                info!("Running database migrations...");
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
                info!("Database migrations completed");
            }

            Arc::new(PgJobStore::new(pool))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory job store; data will not survive a restart");
            Arc::new(InMemoryJobStore::new())
        }
    };

    // Create shared state
    let state = job_board::AppState { jobs, config: config.clone() };

    // Create router
    let app = create_router(state);

    // Start server
    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received ctrl+c, shutting down"),
        Err(e) => {
            warn!("Failed to listen for ctrl+c: {}", e);
            std::future::pending::<()>().await
        }
    }
}
