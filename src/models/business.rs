// Business listing model
// Businesses start PENDING and only an admin moves them to APPROVED/REJECTED.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::status::EntityStatus;
use crate::schema::businesses;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessStatus {
    Pending,
    Approved,
    Rejected,
}

impl EntityStatus for BusinessStatus {
    const ALLOWED: &'static [&'static str] = &["PENDING", "APPROVED", "REJECTED"];

    fn as_str(&self) -> &'static str {
        match self {
            BusinessStatus::Pending => "PENDING",
            BusinessStatus::Approved => "APPROVED",
            BusinessStatus::Rejected => "REJECTED",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(BusinessStatus::Pending),
            "APPROVED" => Some(BusinessStatus::Approved),
            "REJECTED" => Some(BusinessStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = businesses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = businesses)]
pub struct NewBusiness {
    pub owner_id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub description: Option<String>,
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessRequest {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub description: Option<String>,
}

impl Business {
    pub fn is_approved(&self) -> bool {
        self.status == BusinessStatus::Approved.as_str()
    }

    pub async fn find_by_id(
        conn: &mut AsyncPgConnection,
        business_id: Uuid,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::businesses::dsl;

        dsl::businesses
            .filter(dsl::id.eq(business_id))
            .select(Business::as_select())
            .first::<Business>(conn)
            .await
            .optional()
    }

    /// Owner-scoped lookup: the filter hides rows owned by someone else, so a
    /// mismatch is indistinguishable from a missing row.
    pub async fn find_owned(
        conn: &mut AsyncPgConnection,
        business_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::businesses::dsl;

        dsl::businesses
            .filter(dsl::id.eq(business_id))
            .filter(dsl::owner_id.eq(owner_id))
            .select(Business::as_select())
            .first::<Business>(conn)
            .await
            .optional()
    }

    pub async fn list_for_owner(
        conn: &mut AsyncPgConnection,
        owner_id: Uuid,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        use crate::schema::businesses::dsl;

        dsl::businesses
            .filter(dsl::owner_id.eq(owner_id))
            .order(dsl::created_at.desc())
            .select(Business::as_select())
            .load::<Business>(conn)
            .await
    }

    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_business: NewBusiness,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::businesses::dsl;

        diesel::insert_into(dsl::businesses)
            .values(&new_business)
            .get_result::<Business>(conn)
            .await
    }

    pub async fn set_status(
        conn: &mut AsyncPgConnection,
        business_id: Uuid,
        status: BusinessStatus,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::businesses::dsl;

        diesel::update(dsl::businesses.filter(dsl::id.eq(business_id)))
            .set((
                dsl::status.eq(status.as_str()),
                dsl::updated_at.eq(Utc::now()),
            ))
            .get_result::<Business>(conn)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_set() {
        assert_eq!(BusinessStatus::Pending.as_str(), "PENDING");
        assert_eq!(
            BusinessStatus::from_str("APPROVED"),
            Some(BusinessStatus::Approved)
        );
        assert_eq!(BusinessStatus::from_str("approved"), None);
        assert!(BusinessStatus::parse_request("SUSPENDED").is_err());
    }
}
