//! Job posting endpoints
//!
//! - `GET /jobs?offset=&limit=` - list jobs in insertion order
//! - `GET /jobs/{job_id}` - fetch one job
//! - `POST /jobs` - publish a job
//! - `DELETE /jobs/{job_id}` - remove a job and return it

use axum::{
    Router,
    routing::get,
    Json,
    extract::{Path, Query, State, rejection::{JsonRejection, QueryRejection}},
    response::Json as ResponseJson,
};
use crate::db::create_job;
use crate::models::{parse_job_id, AppState, JobListResponse, JobResponse, NewJob, Pagination};
use crate::types::{AppError, AppResult};
use tracing::{debug, info};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/jobs", get(find).post(create))
        .route("/jobs/{job_id}", get(find_by_id).delete(delete_by_id))
        .with_state(state)
}

async fn find(
    State(state): State<AppState>,
    query: Result<Query<Pagination>, QueryRejection>,
) -> AppResult<ResponseJson<JobListResponse>> {
    let Query(page) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if page.is_negative() {
        return Err(AppError::BadRequest(
            "offset and limit must be non-negative".to_string(),
        ));
    }

    let jobs = state.jobs.find(page.skip(), page.take()).await?;
    debug!(count = jobs.len(), offset = ?page.offset, limit = ?page.limit, "Listed jobs");

    Ok(Json(JobListResponse {
        jobs,
        offset: page.offset,
        limit: page.limit,
    }))
}

async fn find_by_id(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<ResponseJson<JobResponse>> {
    let id = parse_job_id(&job_id).ok_or(AppError::NotFound)?;

    let job = state.jobs.find_by_id(id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(JobResponse { job }))
}

async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewJob>, JsonRejection>,
) -> AppResult<ResponseJson<JobResponse>> {
    let Json(new_job) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let job = create_job(state.jobs.as_ref(), new_job).await?;
    info!(job_id = %job.id, title = %job.title, "Job created");

    Ok(Json(JobResponse { job }))
}

async fn delete_by_id(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<ResponseJson<JobResponse>> {
    let id = parse_job_id(&job_id).ok_or(AppError::NotFound)?;

    let job = state.jobs.remove(id).await?.ok_or(AppError::NotFound)?;
    info!(job_id = %job.id, "Job deleted");

    Ok(Json(JobResponse { job }))
}
