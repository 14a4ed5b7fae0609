// Wire envelope tests: error and success responses share the
// { success, code, message, ... } shape across every endpoint

use axum::body::to_bytes;
use axum::response::IntoResponse;
use serde_json::{json, Value};

use loka_backend_core::models::pagination::PageMeta;
use loka_backend_core::utils::api_error::{ApiError, Entity, FieldError};
use loka_backend_core::utils::api_response::ApiSuccess;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body should be JSON")
}

#[tokio::test]
async fn test_not_found_envelope() {
    let response = ApiError::NotFound(Entity::Job).into_response();
    assert_eq!(response.status().as_u16(), 404);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["code"], json!(404));
    assert_eq!(body["message"], json!("Job not found"));
    assert_eq!(body["error"]["code"], json!("JOB_NOT_FOUND"));
    assert_eq!(body["error"]["details"], Value::Null);
}

#[tokio::test]
async fn test_validation_envelope_lists_fields() {
    let err = ApiError::validation(
        "Validation error",
        vec![
            FieldError::new("title", "Title is required"),
            FieldError::new("description", "Description is required"),
        ],
    );
    let response = err.into_response();
    assert_eq!(response.status().as_u16(), 422);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));

    let details = body["error"]["details"]
        .as_array()
        .expect("details should be an array");
    assert_eq!(details.len(), 2);
    assert_eq!(details[0]["field"], json!("title"));
    assert_eq!(details[1]["message"], json!("Description is required"));
}

#[tokio::test]
async fn test_forbidden_and_conflict_envelopes() {
    let response = ApiError::BusinessNotApproved.into_response();
    assert_eq!(response.status().as_u16(), 403);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], json!("BUSINESS_NOT_APPROVED"));
    assert_eq!(body["message"], json!("Business is not approved"));

    let response = ApiError::EmailOrUsernameTaken.into_response();
    assert_eq!(response.status().as_u16(), 409);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], json!("EMAIL_OR_USERNAME_TAKEN"));
}

#[tokio::test]
async fn test_success_envelope_with_meta() {
    let response = ApiSuccess::paginated(
        "Jobs fetched successfully",
        json!([{"id": 1}]),
        PageMeta::new(2, 10, 35),
    )
    .into_response();
    assert_eq!(response.status().as_u16(), 200);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["code"], json!(200));
    assert_eq!(body["message"], json!("Jobs fetched successfully"));
    assert_eq!(body["meta"]["page"], json!(2));
    assert_eq!(body["meta"]["limit"], json!(10));
    assert_eq!(body["meta"]["totalItems"], json!(35));
    assert_eq!(body["meta"]["totalPages"], json!(4));
}

#[tokio::test]
async fn test_created_envelope_has_null_meta() {
    let response = ApiSuccess::created("Business created successfully", json!({"id": 1}))
        .into_response();
    assert_eq!(response.status().as_u16(), 201);

    let body = body_json(response).await;
    assert_eq!(body["code"], json!(201));
    assert_eq!(body["meta"], Value::Null);
    assert_eq!(body["data"]["id"], json!(1));
}
