// Administrative operations: global listings and status changes
// Every entry point here sits behind the ADMIN role middleware; ownership
// scopes do not apply.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Serialize;
use uuid::Uuid;

use crate::db::DieselPool;
use crate::models::article::Article;
use crate::models::business::{Business, BusinessStatus};
use crate::models::event::Event;
use crate::models::job::{JobPost, JobStatus, JobStatusCode, JobWithRelations};
use crate::models::pagination::{Page, PageMeta};
use crate::models::payment::Payment;
use crate::models::role::Role;
use crate::models::status::EntityStatus;
use crate::models::user::User;
use crate::schema::{articles, businesses, events, job_posts, job_statuses, payments, users};
use crate::services::article;
use crate::services::event;
use crate::utils::api_error::{ApiError, Entity};

// ---------- USERS ----------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithRoles {
    #[serde(flatten)]
    pub user: User,
    pub roles: Vec<Role>,
}

pub struct UserFilters {
    pub q: Option<String>,
    pub is_active: Option<bool>,
}

pub async fn list_users(
    pool: &DieselPool,
    filters: UserFilters,
    page: Page,
) -> Result<(Vec<UserWithRoles>, PageMeta), ApiError> {
    let mut conn = pool.get().await?;

    let mut query = users::table.select(User::as_select()).into_boxed();
    let mut count_query = users::table.into_boxed();

    if let Some(is_active) = filters.is_active {
        query = query.filter(users::is_active.eq(is_active));
        count_query = count_query.filter(users::is_active.eq(is_active));
    }

    if let Some(ref q) = filters.q {
        let pattern = format!("%{}%", q);
        query = query.filter(
            users::name
                .ilike(pattern.clone())
                .or(users::email.ilike(pattern.clone()))
                .or(users::username.ilike(pattern.clone())),
        );
        count_query = count_query.filter(
            users::name
                .ilike(pattern.clone())
                .or(users::email.ilike(pattern.clone()))
                .or(users::username.ilike(pattern)),
        );
    }

    let total_items: i64 = count_query.count().get_result(&mut conn).await?;

    let rows = query
        .order(users::created_at.desc())
        .limit(page.limit)
        .offset(page.offset())
        .load::<User>(&mut conn)
        .await?;

    let mut items = Vec::with_capacity(rows.len());
    for user in rows {
        let roles = Role::for_user(&mut conn, user.id).await?;
        items.push(UserWithRoles { user, roles });
    }

    Ok((items, page.meta(total_items)))
}

pub async fn get_user(pool: &DieselPool, user_id: Uuid) -> Result<UserWithRoles, ApiError> {
    let mut conn = pool.get().await?;

    let user = User::find_by_id(&mut conn, user_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::User))?;

    let roles = Role::for_user(&mut conn, user.id).await?;

    Ok(UserWithRoles { user, roles })
}

pub async fn update_user_status(
    pool: &DieselPool,
    user_id: Uuid,
    is_active: bool,
) -> Result<User, ApiError> {
    let mut conn = pool.get().await?;

    User::find_by_id(&mut conn, user_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::User))?;

    Ok(User::set_active(&mut conn, user_id, is_active).await?)
}

// ---------- BUSINESSES ----------

pub struct BusinessFilters {
    pub q: Option<String>,
    pub status: Option<String>,
}

pub async fn list_businesses(
    pool: &DieselPool,
    filters: BusinessFilters,
    page: Page,
) -> Result<(Vec<Business>, PageMeta), ApiError> {
    let mut conn = pool.get().await?;

    let mut query = businesses::table
        .select(Business::as_select())
        .into_boxed();
    let mut count_query = businesses::table.into_boxed();

    if let Some(ref status) = filters.status {
        query = query.filter(businesses::status.eq(status.clone()));
        count_query = count_query.filter(businesses::status.eq(status.clone()));
    }

    if let Some(ref q) = filters.q {
        let pattern = format!("%{}%", q);
        query = query.filter(
            businesses::name
                .ilike(pattern.clone())
                .or(businesses::website_url.ilike(pattern.clone()))
                .or(businesses::description.ilike(pattern.clone())),
        );
        count_query = count_query.filter(
            businesses::name
                .ilike(pattern.clone())
                .or(businesses::website_url.ilike(pattern.clone()))
                .or(businesses::description.ilike(pattern)),
        );
    }

    let total_items: i64 = count_query.count().get_result(&mut conn).await?;

    let items = query
        .order(businesses::created_at.desc())
        .limit(page.limit)
        .offset(page.offset())
        .load::<Business>(&mut conn)
        .await?;

    Ok((items, page.meta(total_items)))
}

pub async fn update_business_status(
    pool: &DieselPool,
    business_id: Uuid,
    requested_status: &str,
) -> Result<Business, ApiError> {
    let status = BusinessStatus::parse_request(requested_status)?;

    let mut conn = pool.get().await?;

    Business::find_by_id(&mut conn, business_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::Business))?;

    Ok(Business::set_status(&mut conn, business_id, status).await?)
}

// ---------- JOBS ----------

pub struct AdminJobFilters {
    pub q: Option<String>,
    pub status: Option<String>,
    pub business_id: Option<Uuid>,
}

pub async fn list_jobs(
    pool: &DieselPool,
    filters: AdminJobFilters,
    page: Page,
) -> Result<(Vec<JobWithRelations>, PageMeta), ApiError> {
    let mut conn = pool.get().await?;

    let mut query = job_posts::table
        .inner_join(businesses::table)
        .inner_join(job_statuses::table)
        .select((
            JobPost::as_select(),
            Business::as_select(),
            JobStatus::as_select(),
        ))
        .into_boxed();

    let mut count_query = job_posts::table
        .inner_join(businesses::table)
        .inner_join(job_statuses::table)
        .into_boxed();

    if let Some(ref status) = filters.status {
        query = query.filter(job_statuses::code.eq(status.clone()));
        count_query = count_query.filter(job_statuses::code.eq(status.clone()));
    }

    if let Some(business_id) = filters.business_id {
        query = query.filter(job_posts::business_id.eq(business_id));
        count_query = count_query.filter(job_posts::business_id.eq(business_id));
    }

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

/// Unscoped status change through the reference table.
pub async fn change_job_status(
    pool: &DieselPool,
    job_id: Uuid,
    requested_status: &str,
) -> Result<JobPost, ApiError> {
    let status = JobStatusCode::parse_request(requested_status)?;

    let mut conn = pool.get().await?;

    let job = job_posts::table
        .filter(job_posts::id.eq(job_id))
        .select(JobPost::as_select())
        .first::<JobPost>(&mut conn)
        .await
        .optional()?
        .ok_or(ApiError::NotFound(Entity::Job))?;

    let status_row = JobStatus::by_code(&mut conn, status.as_str())
        .await?
        .ok_or_else(|| {
            ApiError::internal(format!("{} job status is not configured", status.as_str()))
        })?;

    Ok(JobPost::set_status(&mut conn, job.id, status_row.id).await?)
}

// ---------- ARTICLES ----------

pub struct AdminArticleFilters {
    pub q: Option<String>,
    pub status: Option<String>,
    pub author_id: Option<Uuid>,
}

pub async fn list_articles(
    pool: &DieselPool,
    filters: AdminArticleFilters,
    page: Page,
) -> Result<(Vec<Article>, PageMeta), ApiError> {
    let mut conn = pool.get().await?;

    let mut query = articles::table.select(Article::as_select()).into_boxed();
    let mut count_query = articles::table.into_boxed();

    if let Some(ref status) = filters.status {
        query = query.filter(articles::status.eq(status.clone()));
        count_query = count_query.filter(articles::status.eq(status.clone()));
    }

    if let Some(author_id) = filters.author_id {
        query = query.filter(articles::author_id.eq(author_id));
        count_query = count_query.filter(articles::author_id.eq(author_id));
    }

    if let Some(ref q) = filters.q {
        let pattern = format!("%{}%", q);
        query = query.filter(
            articles::title
                .ilike(pattern.clone())
                .or(articles::content.ilike(pattern.clone())),
        );
        count_query = count_query.filter(
            articles::title
                .ilike(pattern.clone())
                .or(articles::content.ilike(pattern)),
        );
    }

    let total_items: i64 = count_query.count().get_result(&mut conn).await?;

    let items = query
        .order(articles::created_at.desc())
        .limit(page.limit)
        .offset(page.offset())
        .load::<Article>(&mut conn)
        .await?;

    Ok((items, page.meta(total_items)))
}

pub async fn change_article_status(
    pool: &DieselPool,
    article_id: Uuid,
    requested_status: &str,
) -> Result<Article, ApiError> {
    article::change_status(pool, article_id, requested_status).await
}

// ---------- EVENTS ----------

pub struct AdminEventFilters {
    pub q: Option<String>,
    pub status: Option<String>,
    pub creator_id: Option<Uuid>,
}

pub async fn list_events(
    pool: &DieselPool,
    filters: AdminEventFilters,
    page: Page,
) -> Result<(Vec<Event>, PageMeta), ApiError> {
    let mut conn = pool.get().await?;

    let mut query = events::table.select(Event::as_select()).into_boxed();
    let mut count_query = events::table.into_boxed();

    if let Some(ref status) = filters.status {
        query = query.filter(events::status.eq(status.clone()));
        count_query = count_query.filter(events::status.eq(status.clone()));
    }

    if let Some(creator_id) = filters.creator_id {
        query = query.filter(events::creator_id.eq(creator_id));
        count_query = count_query.filter(events::creator_id.eq(creator_id));
    }

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

    let total_items: i64 = count_query.count().get_result(&mut conn).await?;

    let items = query
        .order(events::created_at.desc())
        .limit(page.limit)
        .offset(page.offset())
        .load::<Event>(&mut conn)
        .await?;

    Ok((items, page.meta(total_items)))
}

pub async fn change_event_status(
    pool: &DieselPool,
    event_id: Uuid,
    requested_status: &str,
) -> Result<Event, ApiError> {
    event::change_status(pool, None, event_id, requested_status).await
}

// ---------- PAYMENTS ----------

pub struct AdminPaymentFilters {
    pub status: Option<String>,
    pub payment_type: Option<String>,
    pub user_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
    pub business_id: Option<Uuid>,
    pub job_post_id: Option<Uuid>,
}

pub async fn list_payments(
    pool: &DieselPool,
    filters: AdminPaymentFilters,
    page: Page,
) -> Result<(Vec<Payment>, PageMeta), ApiError> {
    let mut conn = pool.get().await?;

    let mut query = payments::table.select(Payment::as_select()).into_boxed();
    let mut count_query = payments::table.into_boxed();

    if let Some(ref status) = filters.status {
        query = query.filter(payments::status.eq(status.clone()));
        count_query = count_query.filter(payments::status.eq(status.clone()));
    }

    if let Some(ref payment_type) = filters.payment_type {
        query = query.filter(payments::payment_type.eq(payment_type.clone()));
        count_query = count_query.filter(payments::payment_type.eq(payment_type.clone()));
    }

    if let Some(user_id) = filters.user_id {
        query = query.filter(payments::user_id.eq(user_id));
        count_query = count_query.filter(payments::user_id.eq(user_id));
    }

    if let Some(event_id) = filters.event_id {
        query = query.filter(payments::event_id.eq(event_id));
        count_query = count_query.filter(payments::event_id.eq(event_id));
    }

    if let Some(business_id) = filters.business_id {
        query = query.filter(payments::business_id.eq(business_id));
        count_query = count_query.filter(payments::business_id.eq(business_id));
    }

    if let Some(job_post_id) = filters.job_post_id {
        query = query.filter(payments::job_post_id.eq(job_post_id));
        count_query = count_query.filter(payments::job_post_id.eq(job_post_id));
    }

    let total_items: i64 = count_query.count().get_result(&mut conn).await?;

    let items = query
        .order(payments::created_at.desc())
        .limit(page.limit)
        .offset(page.offset())
        .load::<Payment>(&mut conn)
        .await?;

    Ok((items, page.meta(total_items)))
}

pub async fn get_payment(pool: &DieselPool, payment_id: Uuid) -> Result<Payment, ApiError> {
    let mut conn = pool.get().await?;

    Payment::find_by_id(&mut conn, payment_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::Payment))
}
