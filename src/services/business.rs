// Business listing service

use uuid::Uuid;

use crate::db::DieselPool;
use crate::models::business::{Business, BusinessStatus, CreateBusinessRequest, NewBusiness};
use crate::models::status::EntityStatus;
use crate::utils::api_error::{ApiError, Entity};
use crate::utils::validation::trim_optional;

pub async fn list_my_businesses(pool: &DieselPool, owner_id: Uuid) -> Result<Vec<Business>, ApiError> {
    let mut conn = pool.get().await?;
    Ok(Business::list_for_owner(&mut conn, owner_id).await?)
}

pub async fn create_business(
    pool: &DieselPool,
    owner_id: Uuid,
    request: CreateBusinessRequest,
) -> Result<Business, ApiError> {
    let mut conn = pool.get().await?;

    let name = request
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::validation_field("name", "Name is required"))?
        .to_string();

    let business = Business::create(
        &mut conn,
        NewBusiness {
            owner_id,
            name,
            logo_url: trim_optional(request.logo_url.as_ref()),
            website_url: trim_optional(request.website_url.as_ref()),
            description: request.description,
            // Listings wait for admin approval
            status: BusinessStatus::Pending.as_str().to_string(),
        },
    )
    .await?;

    tracing::info!(business_id = %business.id, owner_id = %owner_id, "Business created");

    Ok(business)
}

/// Detail is owner-scoped: someone else's business reads as missing.
pub async fn get_business_owned(
    pool: &DieselPool,
    business_id: Uuid,
    owner_id: Uuid,
) -> Result<Business, ApiError> {
    let mut conn = pool.get().await?;

    Business::find_owned(&mut conn, business_id, owner_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::Business))
}
