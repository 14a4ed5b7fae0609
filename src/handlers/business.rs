// Business handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    app::AppState,
    middleware::auth::AuthenticatedUser,
    models::business::{Business, CreateBusinessRequest},
    services::business,
    utils::{api_error::ApiError, api_response::ApiSuccess},
};

/// GET /api/businesses/me
pub async fn get_my_businesses(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<ApiSuccess<Vec<Business>>, ApiError> {
    let businesses = business::list_my_businesses(&state.db_pool, user.id).await?;

    Ok(ApiSuccess::ok("Businesses fetched successfully", businesses))
}

/// POST /api/businesses
pub async fn create_business(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateBusinessRequest>,
) -> Result<ApiSuccess<Business>, ApiError> {
    let created = business::create_business(&state.db_pool, user.id, request).await?;

    Ok(ApiSuccess::created("Business created successfully", created))
}

/// GET /api/businesses/{id}
pub async fn get_business_detail(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<ApiSuccess<Business>, ApiError> {
    let found = business::get_business_owned(&state.db_pool, id, user.id).await?;

    Ok(ApiSuccess::ok("Business fetched successfully", found))
}
