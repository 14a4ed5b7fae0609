// Contributor profile handlers

use axum::{extract::State, Json};

use crate::{
    app::AppState,
    middleware::auth::AuthenticatedUser,
    models::contributor::{ApplyContributorRequest, ContributorProfile},
    services::contributor,
    utils::{api_error::ApiError, api_response::ApiSuccess},
};

/// POST /api/contributors/apply
pub async fn apply_contributor(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<ApplyContributorRequest>,
) -> Result<ApiSuccess<ContributorProfile>, ApiError> {
    let profile = contributor::apply_contributor(&state.db_pool, user.id, request).await?;

    Ok(ApiSuccess::created(
        "Contributor profile created successfully",
        profile,
    ))
}

/// GET /api/contributors/me
pub async fn get_my_contributor_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<ApiSuccess<ContributorProfile>, ApiError> {
    let profile = contributor::get_my_profile(&state.db_pool, user.id).await?;

    Ok(ApiSuccess::ok(
        "Contributor profile fetched successfully",
        profile,
    ))
}
