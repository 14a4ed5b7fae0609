// Payment model
// A payment is created PENDING next to a paid event registration. The user
// attaches proof; an admin settles it to VERIFIED or REJECTED, which also
// flips the linked registration.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::status::EntityStatus;
use crate::schema::payments;

pub const PAYMENT_TYPE_EVENT_REGISTRATION: &str = "EVENT_REGISTRATION";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Verified,
    Rejected,
}

impl EntityStatus for PaymentStatus {
    const ALLOWED: &'static [&'static str] = &["PENDING", "VERIFIED", "REJECTED"];

    fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Verified => "VERIFIED",
            PaymentStatus::Rejected => "REJECTED",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(PaymentStatus::Pending),
            "VERIFIED" => Some(PaymentStatus::Verified),
            "REJECTED" => Some(PaymentStatus::Rejected),
            _ => None,
        }
    }
}

/// The subset an admin may settle a payment to. PENDING is the initial state
/// only and cannot be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentVerdict {
    Verified,
    Rejected,
}

impl EntityStatus for PaymentVerdict {
    const ALLOWED: &'static [&'static str] = &["VERIFIED", "REJECTED"];

    fn as_str(&self) -> &'static str {
        match self {
            PaymentVerdict::Verified => "VERIFIED",
            PaymentVerdict::Rejected => "REJECTED",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        match s {
            "VERIFIED" => Some(PaymentVerdict::Verified),
            "REJECTED" => Some(PaymentVerdict::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub payment_type: String,
    pub amount: i64,
    pub reference_code: Option<String>,
    pub screenshot_url: Option<String>,
    pub status: String,
    pub verified_by_id: Option<Uuid>,
    pub verified_at: Option<DateTime<Utc>>,
    pub event_registration_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
    pub business_id: Option<Uuid>,
    pub job_post_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = payments)]
pub struct NewPayment {
    pub user_id: Uuid,
    pub payment_type: String,
    pub amount: i64,
    pub reference_code: Option<String>,
    pub screenshot_url: Option<String>,
    pub status: String,
    pub event_registration_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
    pub business_id: Option<Uuid>,
    pub job_post_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachProofRequest {
    pub reference_code: Option<String>,
    pub screenshot_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub status: Option<String>,
}

impl Payment {
    pub fn is_verified(&self) -> bool {
        self.status == PaymentStatus::Verified.as_str()
    }

    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_payment: NewPayment,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::payments::dsl;

        diesel::insert_into(dsl::payments)
            .values(&new_payment)
            .get_result::<Payment>(conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut AsyncPgConnection,
        payment_id: Uuid,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::payments::dsl;

        dsl::payments
            .filter(dsl::id.eq(payment_id))
            .select(Payment::as_select())
            .first::<Payment>(conn)
            .await
            .optional()
    }

    /// Fill in proof fields, leaving whichever the user did not send untouched.
    pub async fn attach_proof(
        conn: &mut AsyncPgConnection,
        payment_id: Uuid,
        reference_code: Option<String>,
        screenshot_url: Option<String>,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::payments::dsl;

        #[derive(AsChangeset)]
        #[diesel(table_name = payments)]
        struct ProofChangeset {
            reference_code: Option<String>,
            screenshot_url: Option<String>,
            updated_at: DateTime<Utc>,
        }

        diesel::update(dsl::payments.filter(dsl::id.eq(payment_id)))
            .set(&ProofChangeset {
                reference_code,
                screenshot_url,
                updated_at: Utc::now(),
            })
            .get_result::<Payment>(conn)
            .await
    }

    /// Record the admin verdict. Unconditional: an already settled payment is
    /// overwritten, matching the behavior this flow has always had.
    pub async fn record_verdict(
        conn: &mut AsyncPgConnection,
        payment_id: Uuid,
        admin_id: Uuid,
        verdict: PaymentVerdict,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::payments::dsl;

        diesel::update(dsl::payments.filter(dsl::id.eq(payment_id)))
            .set((
                dsl::status.eq(verdict.as_str()),
                dsl::verified_by_id.eq(Some(admin_id)),
                dsl::verified_at.eq(Some(Utc::now())),
                dsl::updated_at.eq(Utc::now()),
            ))
            .get_result::<Payment>(conn)
            .await
    }

    pub async fn list_event_payments(
        conn: &mut AsyncPgConnection,
        event_id: Uuid,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        use crate::schema::payments::dsl;

        dsl::payments
            .filter(dsl::event_id.eq(event_id))
            .filter(dsl::payment_type.eq(PAYMENT_TYPE_EVENT_REGISTRATION))
            .order(dsl::created_at.desc())
            .select(Payment::as_select())
            .load::<Payment>(conn)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_status_set() {
        assert_eq!(PaymentStatus::Pending.as_str(), "PENDING");
        assert_eq!(
            PaymentStatus::from_str("VERIFIED"),
            Some(PaymentStatus::Verified)
        );
        assert_eq!(PaymentStatus::from_str("SETTLED"), None);
    }

    #[test]
    fn test_verdict_excludes_pending() {
        assert!(PaymentVerdict::from_str("PENDING").is_none());
        assert_eq!(
            PaymentVerdict::from_str("REJECTED"),
            Some(PaymentVerdict::Rejected)
        );

        let err = PaymentVerdict::parse_request("PENDING").unwrap_err();
        match err {
            crate::utils::api_error::ApiError::Validation { details, .. } => {
                assert_eq!(details[0].message, "Status must be one of VERIFIED, REJECTED");
            },
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}
