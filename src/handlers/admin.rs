// Administrative handlers, all behind the ADMIN role gate

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    app::AppState,
    models::article::Article,
    models::business::Business,
    models::event::Event,
    models::job::{JobPost, JobWithRelations},
    models::pagination::{default_limit, default_page, Page},
    models::payment::Payment,
    models::user::User,
    services::admin::{
        self, AdminArticleFilters, AdminEventFilters, AdminJobFilters, AdminPaymentFilters,
        BusinessFilters, UserFilters, UserWithRoles,
    },
    utils::{api_error::ApiError, api_response::ApiSuccess},
};

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: Option<String>,
}

// ---------- USERS ----------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub q: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusBody {
    pub is_active: Option<bool>,
}

/// GET /api/admin/users
pub async fn get_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<ApiSuccess<Vec<UserWithRoles>>, ApiError> {
    let page = Page::new(query.page, query.limit);
    let filters = UserFilters {
        q: query.q,
        is_active: query.is_active,
    };

    let (items, meta) = admin::list_users(&state.db_pool, filters, page).await?;

    Ok(ApiSuccess::paginated("Users fetched successfully", items, meta))
}

/// GET /api/admin/users/{id}
pub async fn get_user_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiSuccess<UserWithRoles>, ApiError> {
    let user = admin::get_user(&state.db_pool, id).await?;

    Ok(ApiSuccess::ok("User fetched successfully", user))
}

/// PATCH /api/admin/users/{id}/status
pub async fn update_user_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UserStatusBody>,
) -> Result<ApiSuccess<User>, ApiError> {
    let is_active = body
        .is_active
        .ok_or_else(|| ApiError::validation_field("isActive", "isActive is required"))?;

    let updated = admin::update_user_status(&state.db_pool, id, is_active).await?;

    Ok(ApiSuccess::ok("User status updated successfully", updated))
}

// ---------- BUSINESSES ----------

#[derive(Debug, Deserialize)]
pub struct ListBusinessesQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub q: Option<String>,
    pub status: Option<String>,
}

/// GET /api/admin/businesses
pub async fn get_businesses(
    State(state): State<AppState>,
    Query(query): Query<ListBusinessesQuery>,
) -> Result<ApiSuccess<Vec<Business>>, ApiError> {
    let page = Page::new(query.page, query.limit);
    let filters = BusinessFilters {
        q: query.q,
        status: query.status,
    };

    let (items, meta) = admin::list_businesses(&state.db_pool, filters, page).await?;

    Ok(ApiSuccess::paginated(
        "Businesses fetched successfully",
        items,
        meta,
    ))
}

/// PATCH /api/admin/businesses/{id}/status
pub async fn update_business_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusBody>,
) -> Result<ApiSuccess<Business>, ApiError> {
    let status = body
        .status
        .ok_or_else(|| ApiError::validation_field("status", "Status is required"))?;

    let updated = admin::update_business_status(&state.db_pool, id, &status).await?;

    Ok(ApiSuccess::ok(
        "Business status updated successfully",
        updated,
    ))
}

// ---------- JOBS ----------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListJobsQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub q: Option<String>,
    pub status: Option<String>,
    pub business_id: Option<Uuid>,
}

/// GET /api/admin/jobs
pub async fn get_jobs(
    State(state): State<AppState>,
    Query(query): Query<ListJobsQuery>,
) -> Result<ApiSuccess<Vec<JobWithRelations>>, ApiError> {
    let page = Page::new(query.page, query.limit);
    let filters = AdminJobFilters {
        q: query.q,
        status: query.status,
        business_id: query.business_id,
    };

    let (items, meta) = admin::list_jobs(&state.db_pool, filters, page).await?;

    Ok(ApiSuccess::paginated("Jobs fetched successfully", items, meta))
}

/// PATCH /api/admin/jobs/{id}/status
pub async fn update_job_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusBody>,
) -> Result<ApiSuccess<JobPost>, ApiError> {
    let status = body
        .status
        .ok_or_else(|| ApiError::validation_field("status", "Status is required"))?;

    let updated = admin::change_job_status(&state.db_pool, id, &status).await?;

    Ok(ApiSuccess::ok("Job status updated successfully", updated))
}

// ---------- ARTICLES ----------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListArticlesQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub q: Option<String>,
    pub status: Option<String>,
    pub author_id: Option<Uuid>,
}

/// GET /api/admin/articles
pub async fn get_articles(
    State(state): State<AppState>,
    Query(query): Query<ListArticlesQuery>,
) -> Result<ApiSuccess<Vec<Article>>, ApiError> {
    let page = Page::new(query.page, query.limit);
    let filters = AdminArticleFilters {
        q: query.q,
        status: query.status,
        author_id: query.author_id,
    };

    let (items, meta) = admin::list_articles(&state.db_pool, filters, page).await?;

    Ok(ApiSuccess::paginated(
        "Articles fetched successfully",
        items,
        meta,
    ))
}

/// PATCH /api/admin/articles/{id}/status
pub async fn update_article_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusBody>,
) -> Result<ApiSuccess<Article>, ApiError> {
    let status = body
        .status
        .ok_or_else(|| ApiError::validation_field("status", "Status is required"))?;

    let updated = admin::change_article_status(&state.db_pool, id, &status).await?;

    Ok(ApiSuccess::ok(
        "Article status updated successfully",
        updated,
    ))
}

// ---------- EVENTS ----------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub q: Option<String>,
    pub status: Option<String>,
    pub creator_id: Option<Uuid>,
}

/// GET /api/admin/events
pub async fn get_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<ApiSuccess<Vec<Event>>, ApiError> {
    let page = Page::new(query.page, query.limit);
    let filters = AdminEventFilters {
        q: query.q,
        status: query.status,
        creator_id: query.creator_id,
    };

    let (items, meta) = admin::list_events(&state.db_pool, filters, page).await?;

    Ok(ApiSuccess::paginated("Events fetched successfully", items, meta))
}

/// PATCH /api/admin/events/{id}/status
pub async fn update_event_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusBody>,
) -> Result<ApiSuccess<Event>, ApiError> {
    let status = body
        .status
        .ok_or_else(|| ApiError::validation_field("status", "Status is required"))?;

    let updated = admin::change_event_status(&state.db_pool, id, &status).await?;

    Ok(ApiSuccess::ok("Event status updated successfully", updated))
}

// ---------- PAYMENTS ----------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPaymentsQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub status: Option<String>,
    pub payment_type: Option<String>,
    pub user_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
    pub business_id: Option<Uuid>,
    pub job_post_id: Option<Uuid>,
}

/// GET /api/admin/payments
pub async fn get_payments(
    State(state): State<AppState>,
    Query(query): Query<ListPaymentsQuery>,
) -> Result<ApiSuccess<Vec<Payment>>, ApiError> {
    let page = Page::new(query.page, query.limit);
    let filters = AdminPaymentFilters {
        status: query.status,
        payment_type: query.payment_type,
        user_id: query.user_id,
        event_id: query.event_id,
        business_id: query.business_id,
        job_post_id: query.job_post_id,
    };

    let (items, meta) = admin::list_payments(&state.db_pool, filters, page).await?;

    Ok(ApiSuccess::paginated(
        "Payments fetched successfully",
        items,
        meta,
    ))
}

/// GET /api/admin/payments/{id}
pub async fn get_payment_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiSuccess<Payment>, ApiError> {
    let found = admin::get_payment(&state.db_pool, id).await?;

    Ok(ApiSuccess::ok("Payment fetched successfully", found))
}
