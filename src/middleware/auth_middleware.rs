// Bearer-token middleware for route groups with a uniform auth requirement
// (the admin subtree). Verifies the access token and injects
// AuthenticatedUser into request extensions; every authentication failure
// collapses to UNAUTHORIZED.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::middleware::auth::{verify_bearer, AuthenticatedUser};
use crate::utils::api_error::ApiError;

fn bearer_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Require a valid access token.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let user = bearer_token(&request).and_then(|token| verify_bearer(&state, token));

    match user {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        },
        None => {
            tracing::warn!("Access token validation failed");
            ApiError::Unauthorized.into_response()
        },
    }
}

/// Accept guests: a valid token attaches the principal, anything else
/// (including no header at all) proceeds anonymously.
pub async fn auth_optional_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(user) = bearer_token(&request).and_then(|token| verify_bearer(&state, token)) {
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

/// Gate for administrative routes; layered after `auth_middleware`.
pub async fn require_admin(request: Request<Body>, next: Next) -> Response {
    let is_admin = request
        .extensions()
        .get::<AuthenticatedUser>()
        .map(AuthenticatedUser::is_admin)
        .unwrap_or(false);

    if is_admin {
        next.run(request).await
    } else {
        ApiError::Forbidden.into_response()
    }
}
