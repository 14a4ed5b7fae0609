// Authentication handlers: register, login, refresh

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::{
    app::AppState,
    models::user::UserSummary,
    services::auth,
    utils::{api_error::ApiError, api_response::ApiSuccess, validation::RequiredFields},
};

// =============================================================================
// REQUEST/RESPONSE TYPES
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 320, message = "Email must be less than 320 characters"))]
    pub email: Option<String>,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email_or_username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserInfo {
    #[serde(flatten)]
    pub user: UserSummary,
    pub roles: Vec<String>,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<ApiSuccess<serde_json::Value>, ApiError> {
    let mut fields = RequiredFields::new();
    fields
        .require_str("name", request.name.as_ref(), "Name is required")
        .require_str("username", request.username.as_ref(), "Username is required")
        .require_str("email", request.email.as_ref(), "Email is required")
        .require_str("password", request.password.as_ref(), "Password is required");
    fields.check()?;

    request
        .validate()
        .map_err(|e| ApiError::validation(e.to_string(), vec![]))?;

    let email = request.email.unwrap_or_default().trim().to_lowercase();

    let user = auth::register_user(
        &state.db_pool,
        request.name.unwrap_or_default(),
        request.username.unwrap_or_default(),
        email,
        request.password.unwrap_or_default(),
    )
    .await?;

    Ok(ApiSuccess::created(
        "User registered successfully",
        json!(UserSummary::from(&user)),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<ApiSuccess<serde_json::Value>, ApiError> {
    let mut fields = RequiredFields::new();
    fields
        .require_str(
            "emailOrUsername",
            request.email_or_username.as_ref(),
            "Email or username is required",
        )
        .require_str("password", request.password.as_ref(), "Password is required");
    fields.check()?;

    let outcome = auth::login_user(
        &state.db_pool,
        &state.jwt_service,
        request.email_or_username.as_deref().unwrap_or_default(),
        request.password.as_deref().unwrap_or_default(),
    )
    .await?;

    Ok(ApiSuccess::ok(
        "Login successful",
        json!({
            "user": LoginUserInfo {
                user: UserSummary::from(&outcome.user),
                roles: outcome.roles,
            },
            "token": outcome.access_token,
            "refreshToken": outcome.refresh_token,
        }),
    ))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<ApiSuccess<serde_json::Value>, ApiError> {
    let raw_token = match request.refresh_token {
        Some(ref token) if !token.trim().is_empty() => token.clone(),
        _ => {
            return Err(ApiError::validation_field(
                "refreshToken",
                "Refresh token is required",
            ))
        },
    };

    let outcome =
        auth::refresh_access_token(&state.db_pool, &state.jwt_service, &raw_token).await?;

    Ok(ApiSuccess::ok(
        "Token refreshed successfully",
        json!({
            "user": UserSummary::from(&outcome.user),
            "token": outcome.access_token,
        }),
    ))
}
