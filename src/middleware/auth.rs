// Authenticated principal extraction
// Handlers declare `AuthenticatedUser` (reject with 401) or `OptionalUser`
// (guests allowed) as parameters. Routes behind the auth middleware get the
// principal from request extensions; elsewhere the extractor verifies the
// bearer token itself.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::AppState;
use crate::models::role::ADMIN_ROLE;
use crate::utils::api_error::ApiError;

/// The acting principal for the current request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == ADMIN_ROLE)
    }
}

pub(crate) fn bearer_token_from_parts(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

pub(crate) fn verify_bearer(state: &AppState, token: &str) -> Option<AuthenticatedUser> {
    let claims = state.jwt_service.validate_access_token(token).ok()?;
    let id = Uuid::parse_str(&claims.sub).ok()?;

    Some(AuthenticatedUser {
        id,
        email: claims.email,
        roles: claims.roles,
    })
}

fn principal_from_parts(parts: &Parts, state: &AppState) -> Option<AuthenticatedUser> {
    if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
        return Some(user.clone());
    }

    bearer_token_from_parts(parts).and_then(|token| verify_bearer(state, token))
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        principal_from_parts(parts, state).ok_or(ApiError::Unauthorized)
    }
}

/// Extractor for endpoints that accept both authenticated users and guests.
/// An invalid or absent token degrades to an anonymous request.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalUser(principal_from_parts(parts, state)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin() {
        let user = AuthenticatedUser {
            id: Uuid::new_v4(),
            email: "admin@example.com".to_string(),
            roles: vec!["USER".to_string(), "ADMIN".to_string()],
        };
        assert!(user.is_admin());

        let user = AuthenticatedUser {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            roles: vec!["USER".to_string()],
        };
        assert!(!user.is_admin());
    }
}
