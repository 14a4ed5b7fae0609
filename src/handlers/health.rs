// Health endpoint

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{app::AppState, db};

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let timestamp = chrono::Utc::now().to_rfc3339();

    match db::check_diesel_health(&state.db_pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "code": 200,
                "message": "API is healthy",
                "data": {
                    "service": "loka-backend",
                    "timestamp": timestamp,
                    "database": "healthy",
                },
                "meta": null,
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "code": 503,
                "message": "API is degraded",
                "data": {
                    "service": "loka-backend",
                    "timestamp": timestamp,
                    "database": format!("unhealthy: {}", e),
                },
                "meta": null,
            })),
        ),
    }
}
