// Success envelope shared by every handler
// Wire shape: { success, code, message, data, meta }

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::models::pagination::PageMeta;

/// Successful API response. `data` and `meta` serialize as explicit nulls when
/// absent so the envelope shape is stable across endpoints.
#[derive(Debug)]
pub struct ApiSuccess<T: Serialize> {
    status: StatusCode,
    message: String,
    data: Option<T>,
    meta: Option<PageMeta>,
}

impl<T: Serialize> ApiSuccess<T> {
    pub fn ok(message: &str, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            message: message.to_string(),
            data: Some(data),
            meta: None,
        }
    }

    pub fn created(message: &str, data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            message: message.to_string(),
            data: Some(data),
            meta: None,
        }
    }

    pub fn paginated(message: &str, data: T, meta: PageMeta) -> Self {
        Self {
            status: StatusCode::OK,
            message: message.to_string(),
            data: Some(data),
            meta: Some(meta),
        }
    }
}

impl ApiSuccess<serde_json::Value> {
    /// Response with no payload, e.g. the health endpoint.
    pub fn message(message: &str) -> Self {
        Self {
            status: StatusCode::OK,
            message: message.to_string(),
            data: None,
            meta: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": true,
            "code": self.status.as_u16(),
            "message": self.message,
            "data": self.data,
            "meta": self.meta,
        }));

        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let response = ApiSuccess::ok("Fetched", json!({"id": 1}));
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.message, "Fetched");
        assert!(response.meta.is_none());
    }

    #[test]
    fn test_paginated_envelope_carries_meta() {
        let meta = PageMeta::new(2, 10, 35);
        let response = ApiSuccess::paginated("Fetched", json!([]), meta);
        let meta = response.meta.expect("meta should be present");
        assert_eq!(meta.page, 2);
        assert_eq!(meta.total_pages, 4);
    }
}
