// Payment service
// Proof attachment is the user's one write; settlement is the admin's, and it
// flips the linked registration inside the same transaction.

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::db::DieselPool;
use crate::models::event::{Event, EventRegistration, RegistrationStatus};
use crate::models::pagination::{Page, PageMeta};
use crate::models::payment::{AttachProofRequest, Payment, PaymentVerdict};
use crate::models::status::EntityStatus;
use crate::schema::payments;
use crate::utils::api_error::{ApiError, Entity};

/// Attach a transfer reference and/or screenshot to an own payment. Rejected
/// once the payment has been verified; rejection of the payment itself does
/// not lock proof updates out.
pub async fn attach_proof(
    pool: &DieselPool,
    user_id: Uuid,
    payment_id: Uuid,
    request: AttachProofRequest,
) -> Result<Payment, ApiError> {
    if request.reference_code.is_none() && request.screenshot_url.is_none() {
        return Err(ApiError::validation_field(
            "referenceCode",
            "Reference code or screenshot is required",
        ));
    }

    let mut conn = pool.get().await?;

    let payment = Payment::find_by_id(&mut conn, payment_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::Payment))?;

    // Loaded first, authorized second: non-owners learn the payment exists
    if payment.user_id != user_id {
        return Err(ApiError::Forbidden);
    }

    if payment.is_verified() {
        return Err(ApiError::validation_field(
            "paymentId",
            "Payment already verified",
        ));
    }

    let reference_code = request.reference_code.or(payment.reference_code);
    let screenshot_url = request.screenshot_url.or(payment.screenshot_url);

    Ok(Payment::attach_proof(&mut conn, payment.id, reference_code, screenshot_url).await?)
}

/// Admin settlement of an event-registration payment. Writes the verdict and
/// flips the linked registration (VERIFIED -> CONFIRMED, REJECTED -> REJECTED)
/// in one transaction. There is no guard against re-settling an already
/// verified payment; `verified_by`/`verified_at` are overwritten.
pub async fn verify_event_payment(
    pool: &DieselPool,
    admin_id: Uuid,
    payment_id: Uuid,
    requested_status: &str,
) -> Result<Payment, ApiError> {
    let verdict = PaymentVerdict::parse_request(requested_status)?;

    let mut conn = pool.get().await?;

    conn.transaction::<Payment, ApiError, _>(|conn| {
        async move {
            let payment = Payment::find_by_id(conn, payment_id)
                .await?
                .ok_or(ApiError::NotFound(Entity::Payment))?;

            let registration_id = payment.event_registration_id.ok_or_else(|| {
                ApiError::validation(
                    "Payment is not related to an event registration",
                    vec![],
                )
            })?;

            let updated = Payment::record_verdict(conn, payment.id, admin_id, verdict).await?;

            let registration_status = match verdict {
                PaymentVerdict::Verified => RegistrationStatus::Confirmed,
                PaymentVerdict::Rejected => RegistrationStatus::Rejected,
            };

            EventRegistration::set_status(conn, registration_id, registration_status).await?;

            tracing::info!(
                payment_id = %updated.id,
                admin_id = %admin_id,
                verdict = verdict.as_str(),
                "Payment settled"
            );

            Ok(updated)
        }
        .scope_boxed()
    })
    .await
}

/// The caller's own payments, paginated, newest first.
pub async fn list_my_payments(
    pool: &DieselPool,
    user_id: Uuid,
    page: Page,
) -> Result<(Vec<Payment>, PageMeta), ApiError> {
    let mut conn = pool.get().await?;

    let total_items: i64 = payments::table
        .filter(payments::user_id.eq(user_id))
        .count()
        .get_result(&mut conn)
        .await?;

    let items = payments::table
        .filter(payments::user_id.eq(user_id))
        .order(payments::created_at.desc())
        .limit(page.limit)
        .offset(page.offset())
        .select(Payment::as_select())
        .load::<Payment>(&mut conn)
        .await?;

    Ok((items, page.meta(total_items)))
}

/// Payments collected for one owned event.
pub async fn list_event_payments_for_creator(
    pool: &DieselPool,
    creator_id: Uuid,
    event_id: Uuid,
) -> Result<Vec<Payment>, ApiError> {
    let mut conn = pool.get().await?;

    let event = Event::find_owned(&mut conn, event_id, creator_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::Event))?;

    Ok(Payment::list_event_payments(&mut conn, event.id).await?)
}
