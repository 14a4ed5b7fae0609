// Job posting models
// Job status lives in a seeded reference table; posts point at it by id and
// services resolve codes through `JobStatus::by_code`.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::business::Business;
use crate::models::status::EntityStatus;
use crate::schema::{businesses, job_posts, job_statuses};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatusCode {
    Active,
    Suspended,
    Archived,
}

impl EntityStatus for JobStatusCode {
    const ALLOWED: &'static [&'static str] = &["ACTIVE", "SUSPENDED", "ARCHIVED"];

    fn as_str(&self) -> &'static str {
        match self {
            JobStatusCode::Active => "ACTIVE",
            JobStatusCode::Suspended => "SUSPENDED",
            JobStatusCode::Archived => "ARCHIVED",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(JobStatusCode::Active),
            "SUSPENDED" => Some(JobStatusCode::Suspended),
            "ARCHIVED" => Some(JobStatusCode::Archived),
            _ => None,
        }
    }
}

/// Seeded job status reference row.
#[derive(Debug, Clone, Serialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = job_statuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub id: Uuid,
    pub code: String,
    pub label: String,
    pub description: Option<String>,
}

impl JobStatus {
    pub async fn by_code(
        conn: &mut AsyncPgConnection,
        code: &str,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::job_statuses::dsl;

        dsl::job_statuses
            .filter(dsl::code.eq(code))
            .select(JobStatus::as_select())
            .first::<JobStatus>(conn)
            .await
            .optional()
    }
}

#[derive(Debug, Clone, Serialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = job_posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct JobPost {
    pub id: Uuid,
    pub business_id: Uuid,
    pub job_status_id: Uuid,
    pub title: String,
    pub slug: String,
    pub location_type: Option<String>,
    pub location_text: Option<String>,
    pub employment_type: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub application_option_platform: bool,
    pub application_option_external: bool,
    pub external_apply_url: Option<String>,
    pub external_apply_email: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = job_posts)]
pub struct NewJobPost {
    pub business_id: Uuid,
    pub job_status_id: Uuid,
    pub title: String,
    pub slug: String,
    pub location_type: Option<String>,
    pub location_text: Option<String>,
    pub employment_type: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub application_option_platform: bool,
    pub application_option_external: bool,
    pub external_apply_url: Option<String>,
    pub external_apply_email: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Job post together with its parent business and status row, the shape the
/// public endpoints respond with.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobWithRelations {
    #[serde(flatten)]
    pub job: JobPost,
    pub business: Business,
    pub job_status: JobStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub business_id: Option<Uuid>,
    pub title: Option<String>,
    pub location_type: Option<String>,
    pub location_text: Option<String>,
    pub employment_type: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    #[serde(default)]
    pub application_option_platform: bool,
    #[serde(default)]
    pub application_option_external: bool,
    pub external_apply_url: Option<String>,
    pub external_apply_email: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub location_type: Option<String>,
    pub location_text: Option<String>,
    pub employment_type: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub application_option_platform: Option<bool>,
    pub application_option_external: Option<bool>,
    pub external_apply_url: Option<String>,
    pub external_apply_email: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = job_posts)]
pub struct JobPostChangeset {
    pub title: Option<String>,
    pub location_type: Option<String>,
    pub location_text: Option<String>,
    pub employment_type: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub application_option_platform: Option<bool>,
    pub application_option_external: Option<bool>,
    pub external_apply_url: Option<String>,
    pub external_apply_email: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl JobPost {
    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_job: NewJobPost,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::job_posts::dsl;

        diesel::insert_into(dsl::job_posts)
            .values(&new_job)
            .get_result::<JobPost>(conn)
            .await
    }

    pub async fn find_with_relations(
        conn: &mut AsyncPgConnection,
        job_id: Uuid,
    ) -> Result<Option<JobWithRelations>, diesel::result::Error> {
        let row = job_posts::table
            .inner_join(businesses::table)
            .inner_join(job_statuses::table)
            .filter(job_posts::id.eq(job_id))
            .select((
                JobPost::as_select(),
                Business::as_select(),
                JobStatus::as_select(),
            ))
            .first::<(JobPost, Business, JobStatus)>(conn)
            .await
            .optional()?;

        Ok(row.map(|(job, business, job_status)| JobWithRelations {
            job,
            business,
            job_status,
        }))
    }

    pub async fn find_by_slug_with_relations(
        conn: &mut AsyncPgConnection,
        slug_value: &str,
    ) -> Result<Option<JobWithRelations>, diesel::result::Error> {
        let row = job_posts::table
            .inner_join(businesses::table)
            .inner_join(job_statuses::table)
            .filter(job_posts::slug.eq(slug_value))
            .select((
                JobPost::as_select(),
                Business::as_select(),
                JobStatus::as_select(),
            ))
            .first::<(JobPost, Business, JobStatus)>(conn)
            .await
            .optional()?;

        Ok(row.map(|(job, business, job_status)| JobWithRelations {
            job,
            business,
            job_status,
        }))
    }

    /// Lookup scoped to the owner of the parent business.
    pub async fn find_owned(
        conn: &mut AsyncPgConnection,
        job_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Self>, diesel::result::Error> {
        job_posts::table
            .inner_join(businesses::table)
            .filter(job_posts::id.eq(job_id))
            .filter(businesses::owner_id.eq(owner_id))
            .select(JobPost::as_select())
            .first::<JobPost>(conn)
            .await
            .optional()
    }

    pub async fn update_fields(
        conn: &mut AsyncPgConnection,
        job_id: Uuid,
        changes: JobPostChangeset,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::job_posts::dsl;

        diesel::update(dsl::job_posts.filter(dsl::id.eq(job_id)))
            .set(&changes)
            .get_result::<JobPost>(conn)
            .await
    }

    pub async fn set_status(
        conn: &mut AsyncPgConnection,
        job_id: Uuid,
        status_id: Uuid,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::job_posts::dsl;

        diesel::update(dsl::job_posts.filter(dsl::id.eq(job_id)))
            .set((
                dsl::job_status_id.eq(status_id),
                dsl::updated_at.eq(Utc::now()),
            ))
            .get_result::<JobPost>(conn)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_code_set() {
        assert_eq!(JobStatusCode::Active.as_str(), "ACTIVE");
        assert_eq!(
            JobStatusCode::from_str("ARCHIVED"),
            Some(JobStatusCode::Archived)
        );
        assert_eq!(JobStatusCode::from_str("CLOSED"), None);

        let err = JobStatusCode::parse_request("CLOSED").unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err
            .to_string()
            .contains("Invalid status value"));
    }
}
