// Job Board - REST API for publishing and browsing job postings

pub mod config;
pub mod db;
pub mod models;
pub mod types;
pub mod routes;
pub mod middleware;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
