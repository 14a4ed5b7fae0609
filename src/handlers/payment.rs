// Payment handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::{
    app::AppState,
    middleware::auth::AuthenticatedUser,
    models::pagination::{default_limit, default_page, Page},
    models::payment::{AttachProofRequest, Payment, VerifyPaymentRequest},
    services::payment,
    utils::{api_error::ApiError, api_response::ApiSuccess},
};

#[derive(Debug, serde::Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// PATCH /api/payments/{id}/proof
pub async fn attach_payment_proof(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<AttachProofRequest>,
) -> Result<ApiSuccess<Payment>, ApiError> {
    let updated = payment::attach_proof(&state.db_pool, user.id, id, request).await?;

    Ok(ApiSuccess::ok("Payment proof attached successfully", updated))
}

/// PATCH /api/payments/admin/{id}/verify (admin)
pub async fn verify_event_payment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<ApiSuccess<Payment>, ApiError> {
    let status = request
        .status
        .ok_or_else(|| ApiError::validation_field("status", "Status is required"))?;

    let updated = payment::verify_event_payment(&state.db_pool, user.id, id, &status).await?;

    Ok(ApiSuccess::ok("Payment status updated successfully", updated))
}

/// GET /api/payments/me/list
pub async fn get_my_payments(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> Result<ApiSuccess<Vec<Payment>>, ApiError> {
    let page = Page::new(query.page, query.limit);

    let (items, meta) = payment::list_my_payments(&state.db_pool, user.id, page).await?;

    Ok(ApiSuccess::paginated(
        "Payments fetched successfully",
        items,
        meta,
    ))
}

/// GET /api/payments/events/{eventId}
pub async fn get_event_payments_for_creator(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
) -> Result<ApiSuccess<Vec<Payment>>, ApiError> {
    let payments =
        payment::list_event_payments_for_creator(&state.db_pool, user.id, event_id).await?;

    Ok(ApiSuccess::ok(
        "Event payments fetched successfully",
        payments,
    ))
}
