// Job application handlers
// Applying works for both logged-in users and guests; listing and detail
// require authentication.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    app::AppState,
    middleware::auth::{AuthenticatedUser, OptionalUser},
    models::job_application::{CreateJobApplicationRequest, JobApplication},
    services::job_application,
    utils::{api_error::ApiError, api_response::ApiSuccess},
};

/// POST /api/jobs/{jobId}/applications
pub async fn create_job_application(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Path(job_id): Path<Uuid>,
    Json(request): Json<CreateJobApplicationRequest>,
) -> Result<ApiSuccess<JobApplication>, ApiError> {
    let application = job_application::create_application(
        &state.db_pool,
        user.map(|u| u.id),
        job_id,
        request,
    )
    .await?;

    Ok(ApiSuccess::created(
        "Job application created successfully",
        application,
    ))
}

/// GET /api/jobs/{jobId}/applications
pub async fn get_applications_for_job(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(job_id): Path<Uuid>,
) -> Result<ApiSuccess<Vec<JobApplication>>, ApiError> {
    let applications = job_application::list_for_job(&state.db_pool, user.id, job_id).await?;

    Ok(ApiSuccess::ok(
        "Job applications fetched successfully",
        applications,
    ))
}

/// GET /api/job-applications/{id}
pub async fn get_application_detail(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<ApiSuccess<JobApplication>, ApiError> {
    let application = job_application::get_application(&state.db_pool, user.id, id).await?;

    Ok(ApiSuccess::ok(
        "Job application fetched successfully",
        application,
    ))
}
