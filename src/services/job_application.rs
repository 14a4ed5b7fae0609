// Job application service
// Applications land against ACTIVE jobs only. Detail access loads first and
// authorizes second: a non-party sees FORBIDDEN, not a missing row.

use chrono::Utc;
use uuid::Uuid;

use crate::db::DieselPool;
use crate::models::job::{JobPost, JobStatusCode};
use crate::models::job_application::{
    ApplicationMethod, ApplicationStatus, CreateJobApplicationRequest, JobApplication,
    NewJobApplication,
};
use crate::models::status::EntityStatus;
use crate::utils::api_error::{ApiError, Entity};

pub async fn create_application(
    pool: &DieselPool,
    user_id: Option<Uuid>,
    job_id: Uuid,
    request: CreateJobApplicationRequest,
) -> Result<JobApplication, ApiError> {
    let method = request.validate(user_id.is_some())?;

    let mut conn = pool.get().await?;

    let job = JobPost::find_with_relations(&mut conn, job_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::Job))?;

    // A suspended or archived job is hidden from applicants
    if job.job_status.code != JobStatusCode::Active.as_str() {
        return Err(ApiError::NotFound(Entity::Job));
    }

    let (status, external_clicked_at) = match method {
        ApplicationMethod::Platform => (ApplicationStatus::Submitted, None),
        ApplicationMethod::External => (ApplicationStatus::Clicked, Some(Utc::now())),
    };

    let application = JobApplication::create(
        &mut conn,
        NewJobApplication {
            job_post_id: job.job.id,
            user_id,
            applicant_name: request.applicant_name,
            applicant_email: request.applicant_email,
            application_method: method.as_str().to_string(),
            cv_url: request.cv_url,
            resume_url: request.resume_url,
            portfolio_url: request.portfolio_url,
            cover_letter: request.cover_letter,
            external_target: request.external_target,
            external_destination: request.external_destination,
            external_clicked_at,
            status: status.as_str().to_string(),
        },
    )
    .await?;

    tracing::info!(
        application_id = %application.id,
        job_id = %job.job.id,
        method = method.as_str(),
        "Job application created"
    );

    Ok(application)
}

/// Applications for one job, business owner only.
pub async fn list_for_job(
    pool: &DieselPool,
    owner_id: Uuid,
    job_id: Uuid,
) -> Result<Vec<JobApplication>, ApiError> {
    let mut conn = pool.get().await?;

    let job = JobPost::find_owned(&mut conn, job_id, owner_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::Job))?;

    Ok(JobApplication::list_for_job(&mut conn, job.id).await?)
}

/// Detail, visible to the applicant and the owner of the job's business.
pub async fn get_application(
    pool: &DieselPool,
    user_id: Uuid,
    application_id: Uuid,
) -> Result<JobApplication, ApiError> {
    let mut conn = pool.get().await?;

    let application = JobApplication::find_by_id(&mut conn, application_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::JobApplication))?;

    let is_applicant = application.user_id == Some(user_id);

    let is_business_owner = JobPost::find_owned(&mut conn, application.job_post_id, user_id)
        .await?
        .is_some();

    if !is_applicant && !is_business_owner {
        return Err(ApiError::Forbidden);
    }

    Ok(application)
}
