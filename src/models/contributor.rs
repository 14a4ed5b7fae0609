// Contributor profile model
// One profile per user; only ACTIVE contributors may author articles.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::models::status::EntityStatus;
use crate::schema::contributor_profiles;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributorStatus {
    Active,
    Suspended,
}

impl EntityStatus for ContributorStatus {
    const ALLOWED: &'static [&'static str] = &["ACTIVE", "SUSPENDED"];

    fn as_str(&self) -> &'static str {
        match self {
            ContributorStatus::Active => "ACTIVE",
            ContributorStatus::Suspended => "SUSPENDED",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(ContributorStatus::Active),
            "SUSPENDED" => Some(ContributorStatus::Suspended),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = contributor_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct ContributorProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub social_links: Option<JsonValue>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = contributor_profiles)]
pub struct NewContributorProfile {
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub social_links: Option<JsonValue>,
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyContributorRequest {
    pub bio: Option<String>,
    pub social_links: Option<JsonValue>,
}

impl ContributorProfile {
    pub fn is_active(&self) -> bool {
        self.status == ContributorStatus::Active.as_str()
    }

    pub async fn find_by_user(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::contributor_profiles::dsl;

        dsl::contributor_profiles
            .filter(dsl::user_id.eq(user_id))
            .select(ContributorProfile::as_select())
            .first::<ContributorProfile>(conn)
            .await
            .optional()
    }

    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_profile: NewContributorProfile,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::contributor_profiles::dsl;

        diesel::insert_into(dsl::contributor_profiles)
            .values(&new_profile)
            .get_result::<ContributorProfile>(conn)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contributor_status_set() {
        assert_eq!(ContributorStatus::Active.as_str(), "ACTIVE");
        assert_eq!(
            ContributorStatus::from_str("SUSPENDED"),
            Some(ContributorStatus::Suspended)
        );
        assert_eq!(ContributorStatus::from_str("BANNED"), None);
    }
}
