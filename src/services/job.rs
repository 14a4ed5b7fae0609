// Job posting service
// Creation is gated on the parent business being APPROVED; all mutation is
// authorized through business ownership.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::DieselPool;
use crate::models::business::Business;
use crate::models::job::{
    CreateJobRequest, JobPost, JobPostChangeset, JobStatus, JobStatusCode, JobWithRelations,
    NewJobPost, UpdateJobRequest,
};
use crate::models::pagination::{Page, PageMeta};
use crate::models::status::EntityStatus;
use crate::schema::{businesses, job_posts, job_statuses};
use crate::utils::api_error::{ApiError, Entity};
use crate::utils::slug::time_suffixed_slug;

pub struct JobFilters {
    pub q: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
}

/// Public job board: ACTIVE posts only, free text over title/description,
/// newest first.
pub async fn list_jobs(
    pool: &DieselPool,
    filters: JobFilters,
    page: Page,
) -> Result<(Vec<JobWithRelations>, PageMeta), ApiError> {
    let mut conn = pool.get().await?;

    let mut query = job_posts::table
        .inner_join(businesses::table)
        .inner_join(job_statuses::table)
        .filter(job_statuses::code.eq(JobStatusCode::Active.as_str()))
        .select((
            JobPost::as_select(),
            Business::as_select(),
            JobStatus::as_select(),
        ))
        .into_boxed();

    // Same predicate rebuilt for the count so meta reflects the full
    // filtered set, not the returned page
    let mut count_query = job_posts::table
        .inner_join(businesses::table)
        .inner_join(job_statuses::table)
        .filter(job_statuses::code.eq(JobStatusCode::Active.as_str()))
        .into_boxed();

    if let Some(ref q) = filters.q {
        let pattern = format!("%{}%", q);
        query = query.filter(
            job_posts::title
                .ilike(pattern.clone())
                .or(job_posts::description.ilike(pattern.clone())),
        );
        count_query = count_query.filter(
            job_posts::title
                .ilike(pattern.clone())
                .or(job_posts::description.ilike(pattern)),
        );
    }

    if let Some(ref location) = filters.location {
        let pattern = format!("%{}%", location);
        query = query.filter(job_posts::location_text.ilike(pattern.clone()));
        count_query = count_query.filter(job_posts::location_text.ilike(pattern));
    }

    if let Some(ref employment_type) = filters.employment_type {
        query = query.filter(job_posts::employment_type.eq(employment_type.clone()));
        count_query = count_query.filter(job_posts::employment_type.eq(employment_type.clone()));
    }

    let total_items: i64 = count_query.count().get_result(&mut conn).await?;

    let rows = query
        .order(job_posts::created_at.desc())
        .limit(page.limit)
        .offset(page.offset())
        .load::<(JobPost, Business, JobStatus)>(&mut conn)
        .await?;

    let items = rows
        .into_iter()
        .map(|(job, business, job_status)| JobWithRelations {
            job,
            business,
            job_status,
        })
        .collect();

    Ok((items, page.meta(total_items)))
}

/// Jobs owned by the caller through their businesses.
pub async fn list_my_jobs(
    pool: &DieselPool,
    owner_id: Uuid,
    page: Page,
) -> Result<(Vec<JobWithRelations>, PageMeta), ApiError> {
    let mut conn = pool.get().await?;

    let total_items: i64 = job_posts::table
        .inner_join(businesses::table)
        .filter(businesses::owner_id.eq(owner_id))
        .count()
        .get_result(&mut conn)
        .await?;

    let rows = job_posts::table
        .inner_join(businesses::table)
        .inner_join(job_statuses::table)
        .filter(businesses::owner_id.eq(owner_id))
        .order(job_posts::created_at.desc())
        .limit(page.limit)
        .offset(page.offset())
        .select((
            JobPost::as_select(),
            Business::as_select(),
            JobStatus::as_select(),
        ))
        .load::<(JobPost, Business, JobStatus)>(&mut conn)
        .await?;

    let items = rows
        .into_iter()
        .map(|(job, business, job_status)| JobWithRelations {
            job,
            business,
            job_status,
        })
        .collect();

    Ok((items, page.meta(total_items)))
}

pub async fn create_job(
    pool: &DieselPool,
    owner_id: Uuid,
    business_id: Uuid,
    request: CreateJobRequest,
) -> Result<JobPost, ApiError> {
    let mut conn = pool.get().await?;

    // Ownership first: a business belonging to someone else reads as missing
    let business = Business::find_owned(&mut conn, business_id, owner_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::Business))?;

    if !business.is_approved() {
        return Err(ApiError::BusinessNotApproved);
    }

    let active_status = JobStatus::by_code(&mut conn, JobStatusCode::Active.as_str())
        .await?
        .ok_or_else(|| ApiError::internal("ACTIVE job status is not configured"))?;

    let title = request.title.unwrap_or_default();
    let slug = time_suffixed_slug(&title);

    let job = JobPost::create(
        &mut conn,
        NewJobPost {
            business_id: business.id,
            job_status_id: active_status.id,
            title,
            slug,
            location_type: request.location_type,
            location_text: request.location_text,
            employment_type: request.employment_type,
            salary_min: request.salary_min,
            salary_max: request.salary_max,
            currency: request.currency,
            description: request.description,
            requirements: request.requirements,
            application_option_platform: request.application_option_platform,
            application_option_external: request.application_option_external,
            external_apply_url: request.external_apply_url,
            external_apply_email: request.external_apply_email,
            published_at: Some(Utc::now()),
            expires_at: request.expires_at,
        },
    )
    .await?;

    tracing::info!(job_id = %job.id, business_id = %business.id, "Job created");

    Ok(job)
}

/// Public detail by id or slug.
pub async fn get_job(pool: &DieselPool, id_or_slug: &str) -> Result<JobWithRelations, ApiError> {
    let mut conn = pool.get().await?;

    let job = match Uuid::parse_str(id_or_slug) {
        Ok(id) => JobPost::find_with_relations(&mut conn, id).await?,
        Err(_) => JobPost::find_by_slug_with_relations(&mut conn, id_or_slug).await?,
    };

    job.ok_or(ApiError::NotFound(Entity::Job))
}

pub async fn update_job(
    pool: &DieselPool,
    owner_id: Uuid,
    job_id: Uuid,
    request: UpdateJobRequest,
) -> Result<JobPost, ApiError> {
    let mut conn = pool.get().await?;

    let existing = JobPost::find_owned(&mut conn, job_id, owner_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::Job))?;

    let changes = JobPostChangeset {
        title: request.title,
        location_type: request.location_type,
        location_text: request.location_text,
        employment_type: request.employment_type,
        salary_min: request.salary_min,
        salary_max: request.salary_max,
        currency: request.currency,
        description: request.description,
        requirements: request.requirements,
        application_option_platform: request.application_option_platform,
        application_option_external: request.application_option_external,
        external_apply_url: request.external_apply_url,
        external_apply_email: request.external_apply_email,
        expires_at: request.expires_at,
        updated_at: Utc::now(),
    };

    Ok(JobPost::update_fields(&mut conn, existing.id, changes).await?)
}

/// Owner-scoped status change via the reference table. The current status is
/// deliberately not consulted: any member of the allowed set may be requested.
pub async fn change_job_status(
    pool: &DieselPool,
    owner_id: Uuid,
    job_id: Uuid,
    requested_status: &str,
) -> Result<JobPost, ApiError> {
    let status = JobStatusCode::parse_request(requested_status)?;

    let mut conn = pool.get().await?;

    let job = JobPost::find_owned(&mut conn, job_id, owner_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::Job))?;

    let status_row = JobStatus::by_code(&mut conn, status.as_str())
        .await?
        .ok_or_else(|| ApiError::internal(format!("{} job status is not configured", status.as_str())))?;

    Ok(JobPost::set_status(&mut conn, job.id, status_row.id).await?)
}
