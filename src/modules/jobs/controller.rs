use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use jobify_core::AppError;
use jobify_models::auth::MessageResponse;
use jobify_observability::track_job_created;

use super::model::{
    JOB_DELETED_MESSAGE, JOB_MODIFIED_MESSAGE, JobInput, JobMessageResponse, JobQuery, JobResponse,
    JobStats, JobsPage,
};
use super::service::JobService;
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/jobs",
    request_body = JobInput,
    responses(
        (status = 201, description = "Job created", body = JobResponse),
        (status = 400, description = "Validation failed", body = MessageResponse),
        (status = 401, description = "Missing or invalid session", body = MessageResponse)
    ),
    tag = "Jobs",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, input))]
pub async fn create_job(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    JsonBody(input): JsonBody<JobInput>,
) -> Result<(StatusCode, Json<JobResponse>), AppError> {
    let job = JobService::create_job(state.jobs.as_ref(), &claims, input).await?;
    track_job_created();

    Ok((StatusCode::CREATED, Json(JobResponse { job })))
}

/// List the caller's jobs
#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    params(JobQuery),
    responses(
        (status = 200, description = "One page of the caller's jobs", body = JobsPage),
        (status = 400, description = "Unknown filter value", body = MessageResponse),
        (status = 401, description = "Missing or invalid session", body = MessageResponse)
    ),
    tag = "Jobs",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_all_jobs(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(query): Query<JobQuery>,
) -> Result<Json<JobsPage>, AppError> {
    let page = JobService::list_jobs(state.jobs.as_ref(), &claims, query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job found", body = JobResponse),
        (status = 400, description = "Invalid job id", body = MessageResponse),
        (status = 401, description = "Missing or invalid session", body = MessageResponse),
        (status = 403, description = "Caller neither owns the job nor is an admin", body = MessageResponse),
        (status = 404, description = "No job with that id", body = MessageResponse)
    ),
    tag = "Jobs",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_job(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<JobResponse>, AppError> {
    let job = JobService::get_job(state.jobs.as_ref(), &claims, &id).await?;
    Ok(Json(JobResponse { job }))
}

#[utoipa::path(
    patch,
    path = "/api/v1/jobs/{id}",
    params(("id" = String, Path, description = "Job ID")),
    request_body = JobInput,
    responses(
        (status = 200, description = "Job modified", body = JobMessageResponse),
        (status = 400, description = "Validation failed or invalid job id", body = MessageResponse),
        (status = 401, description = "Missing or invalid session", body = MessageResponse),
        (status = 403, description = "Caller neither owns the job nor is an admin", body = MessageResponse),
        (status = 404, description = "No job with that id", body = MessageResponse)
    ),
    tag = "Jobs",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, input))]
pub async fn update_job(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<JobInput>,
) -> Result<Json<JobMessageResponse>, AppError> {
    let job = JobService::update_job(state.jobs.as_ref(), &claims, &id, input).await?;

    Ok(Json(JobMessageResponse {
        msg: JOB_MODIFIED_MESSAGE.to_string(),
        job,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/jobs/{id}",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job deleted", body = JobMessageResponse),
        (status = 400, description = "Invalid job id", body = MessageResponse),
        (status = 401, description = "Missing or invalid session", body = MessageResponse),
        (status = 403, description = "Caller neither owns the job nor is an admin", body = MessageResponse),
        (status = 404, description = "No job with that id", body = MessageResponse)
    ),
    tag = "Jobs",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_job(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<JobMessageResponse>, AppError> {
    let job = JobService::delete_job(state.jobs.as_ref(), &claims, &id).await?;

    Ok(Json(JobMessageResponse {
        msg: JOB_DELETED_MESSAGE.to_string(),
        job,
    }))
}

/// Status counts and monthly applications of the caller's jobs
#[utoipa::path(
    get,
    path = "/api/v1/jobs/stats",
    responses(
        (status = 200, description = "Job statistics", body = JobStats),
        (status = 401, description = "Missing or invalid session", body = MessageResponse)
    ),
    tag = "Jobs",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn show_stats(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<JobStats>, AppError> {
    let stats = JobService::job_stats(state.jobs.as_ref(), &claims).await?;
    Ok(Json(stats))
}
