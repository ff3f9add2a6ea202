//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/jobs` - Job posting CRUD
//! - `/health` - Health checks

pub mod health;
pub mod jobs;

use axum::Router;
use tower_http::trace::TraceLayer;
use crate::middleware::apply_cors;
use crate::models::AppState;
use tracing::info;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let router = Router::new()
        .merge(jobs::router(state.clone()))
        .merge(health::router(state.clone()));

    apply_cors(router, &state.config.server.cors_allowed_origins)
        .layer(TraceLayer::new_for_http())
}
