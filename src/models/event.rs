// Event and event registration models
// Monetary amounts are integer rupiah. A paid registration owes the per-person
// price plus the fixed platform admin fee.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::status::EntityStatus;
use crate::models::user::UserSummary;
use crate::schema::{event_registrations, events};

/// Fixed platform surcharge added to every paid registration, in rupiah.
pub const EVENT_ADMIN_FEE_IDR: i64 = 2_500;

pub const DEFAULT_EVENT_TYPE: &str = "MEETUP";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Draft,
    Published,
    Cancelled,
    Archived,
}

impl EntityStatus for EventStatus {
    const ALLOWED: &'static [&'static str] = &["PUBLISHED", "CANCELLED", "ARCHIVED", "DRAFT"];

    fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "DRAFT",
            EventStatus::Published => "PUBLISHED",
            EventStatus::Cancelled => "CANCELLED",
            EventStatus::Archived => "ARCHIVED",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        match s {
            "DRAFT" => Some(EventStatus::Draft),
            "PUBLISHED" => Some(EventStatus::Published),
            "CANCELLED" => Some(EventStatus::Cancelled),
            "ARCHIVED" => Some(EventStatus::Archived),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    PendingPayment,
    Confirmed,
    Rejected,
}

impl EntityStatus for RegistrationStatus {
    const ALLOWED: &'static [&'static str] = &["PENDING_PAYMENT", "CONFIRMED", "REJECTED"];

    fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::PendingPayment => "PENDING_PAYMENT",
            RegistrationStatus::Confirmed => "CONFIRMED",
            RegistrationStatus::Rejected => "REJECTED",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        match s {
            "PENDING_PAYMENT" => Some(RegistrationStatus::PendingPayment),
            "CONFIRMED" => Some(RegistrationStatus::Confirmed),
            "REJECTED" => Some(RegistrationStatus::Rejected),
            _ => None,
        }
    }
}

/// Registration states that occupy a quota slot. REJECTED frees the slot.
pub const QUOTA_COUNTED_STATUSES: &[&str] = &["PENDING_PAYMENT", "CONFIRMED"];

#[derive(Debug, Clone, Serialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub slug: String,
    pub event_type: String,
    pub description: String,
    pub location: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub is_paid: bool,
    pub price_per_person: Option<i64>,
    pub admin_fee: i64,
    pub quota: Option<i32>,
    pub status: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = events)]
pub struct NewEvent {
    pub creator_id: Uuid,
    pub title: String,
    pub slug: String,
    pub event_type: String,
    pub description: String,
    pub location: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub is_paid: bool,
    pub price_per_person: Option<i64>,
    pub admin_fee: i64,
    pub quota: Option<i32>,
    pub status: String,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWithCreator {
    #[serde(flatten)]
    pub event: Event,
    pub creator: UserSummary,
}

#[derive(Debug, Clone, Serialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = event_registrations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct EventRegistration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = event_registrations)]
pub struct NewEventRegistration {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub total_amount: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_datetime: Option<DateTime<Utc>>,
    pub end_datetime: Option<DateTime<Utc>>,
    pub price_per_person: Option<i64>,
    pub quota: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_datetime: Option<DateTime<Utc>>,
    pub end_datetime: Option<DateTime<Utc>>,
    /// Present means re-derive is_paid/admin_fee from this value.
    pub price_per_person: Option<i64>,
    pub quota: Option<i32>,
}

impl Event {
    /// Amount owed for one registration: price plus admin fee for paid
    /// events, zero otherwise.
    pub fn registration_amount(&self) -> i64 {
        if self.is_paid {
            self.price_per_person.unwrap_or(0) + self.admin_fee
        } else {
            0
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == EventStatus::Published.as_str()
    }

    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_event: NewEvent,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::events::dsl;

        diesel::insert_into(dsl::events)
            .values(&new_event)
            .get_result::<Event>(conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut AsyncPgConnection,
        event_id: Uuid,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::events::dsl;

        dsl::events
            .filter(dsl::id.eq(event_id))
            .select(Event::as_select())
            .first::<Event>(conn)
            .await
            .optional()
    }

    pub async fn find_by_slug(
        conn: &mut AsyncPgConnection,
        slug_value: &str,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::events::dsl;

        dsl::events
            .filter(dsl::slug.eq(slug_value))
            .select(Event::as_select())
            .first::<Event>(conn)
            .await
            .optional()
    }

    /// Creator-scoped lookup; mismatch reads as missing.
    pub async fn find_owned(
        conn: &mut AsyncPgConnection,
        event_id: Uuid,
        creator_id: Uuid,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::events::dsl;

        dsl::events
            .filter(dsl::id.eq(event_id))
            .filter(dsl::creator_id.eq(creator_id))
            .select(Event::as_select())
            .first::<Event>(conn)
            .await
            .optional()
    }

    pub async fn set_status(
        conn: &mut AsyncPgConnection,
        event_id: Uuid,
        status: EventStatus,
        stamp_published_at: bool,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::events::dsl;

        if stamp_published_at {
            diesel::update(dsl::events.filter(dsl::id.eq(event_id)))
                .set((
                    dsl::status.eq(status.as_str()),
                    dsl::published_at.eq(Some(Utc::now())),
                    dsl::updated_at.eq(Utc::now()),
                ))
                .get_result::<Event>(conn)
                .await
        } else {
            diesel::update(dsl::events.filter(dsl::id.eq(event_id)))
                .set((
                    dsl::status.eq(status.as_str()),
                    dsl::updated_at.eq(Utc::now()),
                ))
                .get_result::<Event>(conn)
                .await
        }
    }
}

impl EventRegistration {
    /// Registrations currently holding a slot against the event quota.
    pub async fn count_active(
        conn: &mut AsyncPgConnection,
        event_id: Uuid,
    ) -> Result<i64, diesel::result::Error> {
        use crate::schema::event_registrations::dsl;
        use diesel::dsl::count_star;

        dsl::event_registrations
            .filter(dsl::event_id.eq(event_id))
            .filter(dsl::status.eq_any(QUOTA_COUNTED_STATUSES))
            .select(count_star())
            .get_result(conn)
            .await
    }

    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_registration: NewEventRegistration,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::event_registrations::dsl;

        diesel::insert_into(dsl::event_registrations)
            .values(&new_registration)
            .get_result::<EventRegistration>(conn)
            .await
    }

    pub async fn list_for_event(
        conn: &mut AsyncPgConnection,
        event_id: Uuid,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        use crate::schema::event_registrations::dsl;

        dsl::event_registrations
            .filter(dsl::event_id.eq(event_id))
            .order(dsl::created_at.desc())
            .select(EventRegistration::as_select())
            .load::<EventRegistration>(conn)
            .await
    }

    /// Registration counts per status for one event.
    pub async fn counts_by_status(
        conn: &mut AsyncPgConnection,
        event_id: Uuid,
    ) -> Result<Vec<(String, i64)>, diesel::result::Error> {
        use crate::schema::event_registrations::dsl;
        use diesel::dsl::count_star;

        dsl::event_registrations
            .filter(dsl::event_id.eq(event_id))
            .group_by(dsl::status)
            .select((dsl::status, count_star()))
            .load::<(String, i64)>(conn)
            .await
    }

    pub async fn set_status(
        conn: &mut AsyncPgConnection,
        registration_id: Uuid,
        status: RegistrationStatus,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::event_registrations::dsl;

        diesel::update(dsl::event_registrations.filter(dsl::id.eq(registration_id)))
            .set((
                dsl::status.eq(status.as_str()),
                dsl::updated_at.eq(Utc::now()),
            ))
            .get_result::<EventRegistration>(conn)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event(is_paid: bool, price: Option<i64>) -> Event {
        let now = Utc::now();
        Event {
            id: Uuid::new_v4(),
            creator_id: Uuid::new_v4(),
            title: "Rust Meetup".to_string(),
            slug: "rust-meetup-1700000000000".to_string(),
            event_type: DEFAULT_EVENT_TYPE.to_string(),
            description: "Monthly meetup".to_string(),
            location: "Jakarta".to_string(),
            start_datetime: now,
            end_datetime: now,
            is_paid,
            price_per_person: price,
            admin_fee: if is_paid { EVENT_ADMIN_FEE_IDR } else { 0 },
            quota: None,
            status: "PUBLISHED".to_string(),
            published_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_registration_amount_for_paid_event() {
        let event = sample_event(true, Some(50_000));
        assert_eq!(event.registration_amount(), 52_500);
    }

    #[test]
    fn test_registration_amount_for_free_event() {
        let event = sample_event(false, None);
        assert_eq!(event.registration_amount(), 0);
    }

    #[test]
    fn test_event_status_set() {
        assert_eq!(
            EventStatus::from_str("CANCELLED"),
            Some(EventStatus::Cancelled)
        );
        assert_eq!(EventStatus::from_str("LIVE"), None);

        let err = EventStatus::parse_request("LIVE").unwrap_err();
        match err {
            crate::utils::api_error::ApiError::Validation { details, .. } => {
                assert_eq!(
                    details[0].message,
                    "Status must be one of PUBLISHED, CANCELLED, ARCHIVED, DRAFT"
                );
            },
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_quota_counted_statuses_exclude_rejected() {
        assert!(QUOTA_COUNTED_STATUSES.contains(&"PENDING_PAYMENT"));
        assert!(QUOTA_COUNTED_STATUSES.contains(&"CONFIRMED"));
        assert!(!QUOTA_COUNTED_STATUSES.contains(&"REJECTED"));
    }
}
