// Crate-wide API error type
// Every domain failure is constructed at the point of detection and carried
// unchanged to the boundary, where it is serialized into the wire envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Entity kinds that can be reported as "not found" with their own error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Role,
    Business,
    Job,
    JobApplication,
    ContributorProfile,
    Article,
    Event,
    EventRegistration,
    Payment,
}

impl Entity {
    pub fn error_code(&self) -> &'static str {
        match self {
            Entity::User => "USER_NOT_FOUND",
            Entity::Role => "ROLE_NOT_FOUND",
            Entity::Business => "BUSINESS_NOT_FOUND",
            Entity::Job => "JOB_NOT_FOUND",
            Entity::JobApplication => "JOB_APPLICATION_NOT_FOUND",
            Entity::ContributorProfile => "CONTRIBUTOR_PROFILE_NOT_FOUND",
            Entity::Article => "ARTICLE_NOT_FOUND",
            Entity::Event => "EVENT_NOT_FOUND",
            Entity::EventRegistration => "EVENT_REGISTRATION_NOT_FOUND",
            Entity::Payment => "PAYMENT_NOT_FOUND",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Entity::User => "User not found",
            Entity::Role => "Role not found",
            Entity::Business => "Business not found",
            Entity::Job => "Job not found",
            Entity::JobApplication => "Job application not found",
            Entity::ContributorProfile => "Contributor profile not found",
            Entity::Article => "Article not found",
            Entity::Event => "Event not found",
            Entity::EventRegistration => "Event registration not found",
            Entity::Payment => "Payment not found",
        }
    }
}

/// A single field-level validation failure, surfaced in `error.details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Closed set of API failures. Variants map one-to-one onto the HTTP status
/// and symbolic error code of the wire envelope.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<FieldError>,
    },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Forbidden")]
    Forbidden,

    #[error("Business is not approved")]
    BusinessNotApproved,

    #[error("Contributor is not active")]
    ContributorNotActive,

    #[error("{}", .0.message())]
    NotFound(Entity),

    #[error("Email or username is already taken")]
    EmailOrUsernameTaken,

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Validation failure with an explicit top-level message and field details.
    pub fn validation(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details,
        }
    }

    /// Validation failure naming a single field.
    pub fn validation_field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        ApiError::Validation {
            message: message.clone(),
            details: vec![FieldError::new(field, message)],
        }
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        ApiError::Internal(err.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::BusinessNotApproved => StatusCode::FORBIDDEN,
            ApiError::ContributorNotActive => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::EmailOrUsernameTaken => StatusCode::CONFLICT,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::Forbidden => "FORBIDDEN",
            ApiError::BusinessNotApproved => "BUSINESS_NOT_APPROVED",
            ApiError::ContributorNotActive => "CONTRIBUTOR_NOT_ACTIVE",
            ApiError::NotFound(entity) => entity.error_code(),
            ApiError::EmailOrUsernameTaken => "EMAIL_OR_USERNAME_TAKEN",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn details(&self) -> serde_json::Value {
        match self {
            ApiError::Validation { details, .. } => {
                serde_json::to_value(details).unwrap_or(serde_json::Value::Null)
            },
            // Underlying failure is exposed only outside production
            ApiError::Internal(msg) if expose_internal_details() => json!(msg),
            _ => serde_json::Value::Null,
        }
    }
}

fn expose_internal_details() -> bool {
    std::env::var("ENVIRONMENT")
        .map(|env| env.to_lowercase() != "production")
        .unwrap_or(true)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, ApiError::Internal(_)) {
            tracing::error!(error = %self, code = self.error_code(), "Request failed");
        }

        let status = self.status_code();
        let body = Json(json!({
            "success": false,
            "code": status.as_u16(),
            "message": self.to_string(),
            "error": {
                "code": self.error_code(),
                "details": self.details(),
            }
        }));

        (status, body).into_response()
    }
}

// Conversion from infrastructure error types

impl From<diesel::result::Error> for ApiError {
    fn from(error: diesel::result::Error) -> Self {
        match error {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                info,
            ) => ApiError::Conflict(info.message().to_string()),
            _ => ApiError::Internal(error.to_string()),
        }
    }
}

impl From<bb8::RunError<diesel_async::pooled_connection::PoolError>> for ApiError {
    fn from(error: bb8::RunError<diesel_async::pooled_connection::PoolError>) -> Self {
        ApiError::Internal(error.to_string())
    }
}

impl From<crate::utils::password::PasswordError> for ApiError {
    fn from(error: crate::utils::password::PasswordError) -> Self {
        ApiError::Internal(error.to_string())
    }
}

impl From<crate::services::jwt::JwtError> for ApiError {
    fn from(error: crate::services::jwt::JwtError) -> Self {
        use crate::services::jwt::JwtError;
        match error {
            JwtError::TokenExpired | JwtError::InvalidToken => ApiError::Unauthorized,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_match_taxonomy() {
        assert_eq!(
            ApiError::validation("bad", vec![]).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::BusinessNotApproved.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound(Entity::Job).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::EmailOrUsernameTaken.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_entity_error_codes() {
        assert_eq!(Entity::Job.error_code(), "JOB_NOT_FOUND");
        assert_eq!(Entity::Business.error_code(), "BUSINESS_NOT_FOUND");
        assert_eq!(Entity::Payment.error_code(), "PAYMENT_NOT_FOUND");
        assert_eq!(
            ApiError::NotFound(Entity::Event).error_code(),
            "EVENT_NOT_FOUND"
        );
        assert_eq!(ApiError::NotFound(Entity::Event).to_string(), "Event not found");
    }

    #[test]
    fn test_validation_field_carries_details() {
        let err = ApiError::validation_field("portfolioUrl", "Portfolio URL is required");
        match &err {
            ApiError::Validation { details, .. } => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "portfolioUrl");
                assert_eq!(details[0].message, "Portfolio URL is required");
            },
            other => panic!("Expected validation error, got {:?}", other),
        }
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_unhandled_store_errors_map_to_internal() {
        // Unique violations become Conflict; every other store error is an
        // internal failure. NotFound is handled at call sites via optional().
        let not_found: ApiError = diesel::result::Error::NotFound.into();
        assert!(matches!(not_found, ApiError::Internal(_)));
    }
}
