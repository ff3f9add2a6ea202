use axum::{Router, routing::get, Json, extract::State, response::Json as ResponseJson};
use crate::models::{AppState, HealthResponse};
use tracing::warn;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> ResponseJson<HealthResponse> {
    let database = match state.jobs.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            warn!("Database health check failed: {}", e);
            "unavailable"
        }
    };

    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        database: database.to_string(),
    };

    Json(response)
}
