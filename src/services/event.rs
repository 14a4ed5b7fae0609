// Event service
// Carries the capacity-checked registration flow: quota check, status gate,
// amount computation and the conditional payment row all commit in one
// transaction so a paid registration never exists without its payment.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::db::DieselPool;
use crate::models::event::{
    CreateEventRequest, Event, EventRegistration, EventStatus, EventWithCreator, NewEvent,
    NewEventRegistration, RegistrationStatus, UpdateEventRequest, DEFAULT_EVENT_TYPE,
    EVENT_ADMIN_FEE_IDR,
};
use crate::models::pagination::{Page, PageMeta};
use crate::models::payment::{NewPayment, Payment, PaymentStatus, PAYMENT_TYPE_EVENT_REGISTRATION};
use crate::models::status::EntityStatus;
use crate::models::user::{User, UserSummary};
use crate::schema::{event_registrations, events, users};
use crate::utils::api_error::{ApiError, Entity};
use crate::utils::slug::time_suffixed_slug;

pub struct EventFilters {
    pub q: Option<String>,
    pub upcoming: bool,
}

/// Outcome of one registration attempt. `payment` is present only for paid
/// events.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationOutcome {
    pub event: Event,
    pub registration: EventRegistration,
    pub payment: Option<Payment>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationStats {
    pub event_id: Uuid,
    pub total_registrations: i64,
    pub by_status: HashMap<String, i64>,
}

/// Public event listing: PUBLISHED only, chronological by start time.
pub async fn list_public(
    pool: &DieselPool,
    filters: EventFilters,
    page: Page,
) -> Result<(Vec<EventWithCreator>, PageMeta), ApiError> {
    let mut conn = pool.get().await?;

    let mut query = events::table
        .inner_join(users::table)
        .filter(events::status.eq(EventStatus::Published.as_str()))
        .select((Event::as_select(), User::as_select()))
        .into_boxed();

    let mut count_query = events::table
        .inner_join(users::table)
        .filter(events::status.eq(EventStatus::Published.as_str()))
        .into_boxed();

    if let Some(ref q) = filters.q {
        let pattern = format!("%{}%", q);
        query = query.filter(
            events::title
                .ilike(pattern.clone())
                .or(events::description.ilike(pattern.clone()))
                .or(events::location.ilike(pattern.clone())),
        );
        count_query = count_query.filter(
            events::title
                .ilike(pattern.clone())
                .or(events::description.ilike(pattern.clone()))
                .or(events::location.ilike(pattern)),
        );
    }

    if filters.upcoming {
        let now = Utc::now();
        query = query.filter(events::start_datetime.ge(now));
        count_query = count_query.filter(events::start_datetime.ge(now));
    }

    let total_items: i64 = count_query.count().get_result(&mut conn).await?;

    let rows = query
        .order(events::start_datetime.asc())
        .limit(page.limit)
        .offset(page.offset())
        .load::<(Event, User)>(&mut conn)
        .await?;

    let items = rows
        .into_iter()
        .map(|(event, creator)| EventWithCreator {
            event,
            creator: UserSummary::from(&creator),
        })
        .collect();

    Ok((items, page.meta(total_items)))
}

pub async fn list_my_events(
    pool: &DieselPool,
    creator_id: Uuid,
    page: Page,
) -> Result<(Vec<Event>, PageMeta), ApiError> {
    let mut conn = pool.get().await?;

    let total_items: i64 = events::table
        .filter(events::creator_id.eq(creator_id))
        .count()
        .get_result(&mut conn)
        .await?;

    let items = events::table
        .filter(events::creator_id.eq(creator_id))
        .order(events::created_at.desc())
        .limit(page.limit)
        .offset(page.offset())
        .select(Event::as_select())
        .load::<Event>(&mut conn)
        .await?;

    Ok((items, page.meta(total_items)))
}

/// Create an event, published immediately. Paid-ness is derived from the
/// per-person price; the admin fee is the fixed platform constant.
pub async fn create_event(
    pool: &DieselPool,
    creator_id: Uuid,
    request: CreateEventRequest,
) -> Result<Event, ApiError> {
    let mut conn = pool.get().await?;

    let title = request.title.unwrap_or_default();
    let slug = time_suffixed_slug(&title);

    let is_paid = request.price_per_person.map(|p| p > 0).unwrap_or(false);

    let event = Event::create(
        &mut conn,
        NewEvent {
            creator_id,
            title,
            slug,
            event_type: request
                .event_type
                .unwrap_or_else(|| DEFAULT_EVENT_TYPE.to_string()),
            description: request.description.unwrap_or_default(),
            location: request.location.unwrap_or_default(),
            start_datetime: request.start_datetime.unwrap_or_else(Utc::now),
            end_datetime: request.end_datetime.unwrap_or_else(Utc::now),
            is_paid,
            price_per_person: if is_paid { request.price_per_person } else { None },
            admin_fee: if is_paid { EVENT_ADMIN_FEE_IDR } else { 0 },
            quota: request.quota,
            status: EventStatus::Published.as_str().to_string(),
            published_at: Some(Utc::now()),
        },
    )
    .await?;

    tracing::info!(event_id = %event.id, creator_id = %creator_id, "Event created");

    Ok(event)
}

/// Public detail by id or slug; non-PUBLISHED events read as missing.
pub async fn get_public(pool: &DieselPool, id_or_slug: &str) -> Result<EventWithCreator, ApiError> {
    let mut conn = pool.get().await?;

    let event = match Uuid::parse_str(id_or_slug) {
        Ok(id) => Event::find_by_id(&mut conn, id).await?,
        Err(_) => Event::find_by_slug(&mut conn, id_or_slug).await?,
    };

    let event = event
        .filter(|e| e.is_published())
        .ok_or(ApiError::NotFound(Entity::Event))?;

    let creator = User::find_by_id(&mut conn, event.creator_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::User))?;

    Ok(EventWithCreator {
        creator: UserSummary::from(&creator),
        event,
    })
}

pub async fn update_event(
    pool: &DieselPool,
    creator_id: Uuid,
    event_id: Uuid,
    request: UpdateEventRequest,
) -> Result<Event, ApiError> {
    let mut conn = pool.get().await?;

    let existing = Event::find_owned(&mut conn, event_id, creator_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::Event))?;

    // Price changes re-derive paid-ness and the fee
    let (is_paid, price_per_person, admin_fee) = match request.price_per_person {
        Some(price) if price > 0 => (true, Some(price), EVENT_ADMIN_FEE_IDR),
        Some(_) => (false, None, 0),
        None => (
            existing.is_paid,
            existing.price_per_person,
            existing.admin_fee,
        ),
    };

    let updated = diesel::update(events::table.filter(events::id.eq(existing.id)))
        .set((
            events::title.eq(request.title.unwrap_or(existing.title)),
            events::description.eq(request.description.unwrap_or(existing.description)),
            events::location.eq(request.location.unwrap_or(existing.location)),
            events::start_datetime.eq(request.start_datetime.unwrap_or(existing.start_datetime)),
            events::end_datetime.eq(request.end_datetime.unwrap_or(existing.end_datetime)),
            events::quota.eq(request.quota.or(existing.quota)),
            events::is_paid.eq(is_paid),
            events::price_per_person.eq(price_per_person),
            events::admin_fee.eq(admin_fee),
            events::updated_at.eq(Utc::now()),
        ))
        .get_result::<Event>(&mut conn)
        .await?;

    Ok(updated)
}

/// Creator-scoped status change; `published_at` is stamped once.
pub async fn change_status(
    pool: &DieselPool,
    creator_id: Option<Uuid>,
    event_id: Uuid,
    requested_status: &str,
) -> Result<Event, ApiError> {
    let status = EventStatus::parse_request(requested_status)?;

    let mut conn = pool.get().await?;

    let existing = match creator_id {
        Some(creator_id) => Event::find_owned(&mut conn, event_id, creator_id).await?,
        // Admin path skips the ownership scope
        None => Event::find_by_id(&mut conn, event_id).await?,
    }
    .ok_or(ApiError::NotFound(Entity::Event))?;

    let stamp_published_at =
        status == EventStatus::Published && existing.published_at.is_none();

    Ok(Event::set_status(&mut conn, existing.id, status, stamp_published_at).await?)
}

/// Capacity-checked registration. Steps: load event, enforce quota over
/// non-rejected registrations, require PUBLISHED, compute the amount, insert
/// the registration, and insert the linked PENDING payment when paid. All
/// inside one transaction; the quota read still races a concurrent commit
/// that slips between check and insert.
pub async fn register_for_event(
    pool: &DieselPool,
    user_id: Uuid,
    event_id: Uuid,
) -> Result<RegistrationOutcome, ApiError> {
    let mut conn = pool.get().await?;

    conn.transaction::<RegistrationOutcome, ApiError, _>(|conn| {
        async move {
            let event = Event::find_by_id(conn, event_id)
                .await?
                .ok_or(ApiError::NotFound(Entity::Event))?;

            if let Some(quota) = event.quota {
                if quota > 0 {
                    let taken = EventRegistration::count_active(conn, event.id).await?;
                    if taken >= quota as i64 {
                        return Err(ApiError::validation_field(
                            "eventId",
                            "Event quota is full",
                        ));
                    }
                }
            }

            if !event.is_published() {
                return Err(ApiError::validation_field(
                    "eventId",
                    "Event is not open for registration",
                ));
            }

            let total_amount = event.registration_amount();

            let status = if event.is_paid {
                RegistrationStatus::PendingPayment
            } else {
                RegistrationStatus::Confirmed
            };

            let registration = EventRegistration::create(
                conn,
                NewEventRegistration {
                    event_id: event.id,
                    user_id,
                    status: status.as_str().to_string(),
                    total_amount,
                },
            )
            .await?;

            let payment = if event.is_paid {
                Some(
                    Payment::create(
                        conn,
                        NewPayment {
                            user_id,
                            payment_type: PAYMENT_TYPE_EVENT_REGISTRATION.to_string(),
                            amount: registration.total_amount,
                            reference_code: None,
                            screenshot_url: None,
                            status: PaymentStatus::Pending.as_str().to_string(),
                            event_registration_id: Some(registration.id),
                            event_id: Some(event.id),
                            business_id: None,
                            job_post_id: None,
                        },
                    )
                    .await?,
                )
            } else {
                None
            };

            tracing::info!(
                registration_id = %registration.id,
                event_id = %event.id,
                user_id = %user_id,
                paid = event.is_paid,
                "Event registration created"
            );

            Ok(RegistrationOutcome {
                event,
                registration,
                payment,
            })
        }
        .scope_boxed()
    })
    .await
}

/// Registrations for an owned event, newest first.
pub async fn list_registrations(
    pool: &DieselPool,
    creator_id: Uuid,
    event_id: Uuid,
) -> Result<Vec<EventRegistration>, ApiError> {
    let mut conn = pool.get().await?;

    let event = Event::find_owned(&mut conn, event_id, creator_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::Event))?;

    Ok(EventRegistration::list_for_event(&mut conn, event.id).await?)
}

pub async fn registration_stats(
    pool: &DieselPool,
    creator_id: Uuid,
    event_id: Uuid,
) -> Result<RegistrationStats, ApiError> {
    let mut conn = pool.get().await?;

    let event = Event::find_owned(&mut conn, event_id, creator_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::Event))?;

    let grouped = EventRegistration::counts_by_status(&mut conn, event.id).await?;

    let total_registrations = grouped.iter().map(|(_, count)| count).sum();
    let by_status = grouped.into_iter().collect();

    Ok(RegistrationStats {
        event_id: event.id,
        total_registrations,
        by_status,
    })
}

/// The caller's own registrations, paginated, newest first.
pub async fn list_my_registrations(
    pool: &DieselPool,
    user_id: Uuid,
    page: Page,
) -> Result<(Vec<EventRegistration>, PageMeta), ApiError> {
    let mut conn = pool.get().await?;

    let total_items: i64 = event_registrations::table
        .filter(event_registrations::user_id.eq(user_id))
        .count()
        .get_result(&mut conn)
        .await?;

    let items = event_registrations::table
        .filter(event_registrations::user_id.eq(user_id))
        .order(event_registrations::created_at.desc())
        .limit(page.limit)
        .offset(page.offset())
        .select(EventRegistration::as_select())
        .load::<EventRegistration>(&mut conn)
        .await?;

    Ok((items, page.meta(total_items)))
}
