// Job posting handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    app::AppState,
    middleware::auth::AuthenticatedUser,
    models::job::{CreateJobRequest, JobPost, JobWithRelations, UpdateJobRequest},
    models::pagination::{default_limit, default_page, Page},
    services::job::{self, JobFilters},
    utils::{api_error::ApiError, api_response::ApiSuccess, validation::RequiredFields},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListJobsQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub q: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: Option<String>,
}

/// GET /api/jobs
pub async fn get_jobs(
    State(state): State<AppState>,
    Query(query): Query<ListJobsQuery>,
) -> Result<ApiSuccess<Vec<JobWithRelations>>, ApiError> {
    let page = Page::new(query.page, query.limit);
    let filters = JobFilters {
        q: query.q,
        location: query.location,
        employment_type: query.employment_type,
    };

    let (items, meta) = job::list_jobs(&state.db_pool, filters, page).await?;

    Ok(ApiSuccess::paginated("Jobs fetched successfully", items, meta))
}

/// GET /api/jobs/me/list
pub async fn get_my_jobs(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> Result<ApiSuccess<Vec<JobWithRelations>>, ApiError> {
    let page = Page::new(query.page, query.limit);

    let (items, meta) = job::list_my_jobs(&state.db_pool, user.id, page).await?;

    Ok(ApiSuccess::paginated("Jobs fetched successfully", items, meta))
}

/// POST /api/jobs
pub async fn create_job(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateJobRequest>,
) -> Result<ApiSuccess<JobPost>, ApiError> {
    let mut fields = RequiredFields::new();
    fields
        .require("businessId", &request.business_id, "Business ID is required")
        .require_str("title", request.title.as_ref(), "Title is required")
        .require_str(
            "locationType",
            request.location_type.as_ref(),
            "Location type is required",
        )
        .require_str(
            "employmentType",
            request.employment_type.as_ref(),
            "Employment type is required",
        )
        .require_str(
            "description",
            request.description.as_ref(),
            "Description is required",
        );
    fields.check()?;

    let business_id = request
        .business_id
        .ok_or_else(|| ApiError::validation_field("businessId", "Business ID is required"))?;

    let created = job::create_job(&state.db_pool, user.id, business_id, request).await?;

    Ok(ApiSuccess::created("Job created successfully", created))
}

/// GET /api/jobs/{idOrSlug}
pub async fn get_job_detail(
    State(state): State<AppState>,
    Path(id_or_slug): Path<String>,
) -> Result<ApiSuccess<JobWithRelations>, ApiError> {
    let found = job::get_job(&state.db_pool, &id_or_slug).await?;

    Ok(ApiSuccess::ok("Job fetched successfully", found))
}

/// PATCH /api/jobs/{id}
pub async fn update_job(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateJobRequest>,
) -> Result<ApiSuccess<JobPost>, ApiError> {
    let updated = job::update_job(&state.db_pool, user.id, id, request).await?;

    Ok(ApiSuccess::ok("Job updated successfully", updated))
}

/// PATCH /api/jobs/{id}/status
pub async fn change_job_status(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusBody>,
) -> Result<ApiSuccess<JobPost>, ApiError> {
    let status = body
        .status
        .ok_or_else(|| ApiError::validation_field("status", "Status is required"))?;

    let updated = job::change_job_status(&state.db_pool, user.id, id, &status).await?;

    Ok(ApiSuccess::ok("Job status updated successfully", updated))
}
