// Contributor profile service

use uuid::Uuid;

use crate::db::DieselPool;
use crate::models::contributor::{
    ApplyContributorRequest, ContributorProfile, ContributorStatus, NewContributorProfile,
};
use crate::models::status::EntityStatus;
use crate::utils::api_error::{ApiError, Entity};

pub async fn apply_contributor(
    pool: &DieselPool,
    user_id: Uuid,
    request: ApplyContributorRequest,
) -> Result<ContributorProfile, ApiError> {
    let mut conn = pool.get().await?;

    if ContributorProfile::find_by_user(&mut conn, user_id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "Contributor profile already exists".to_string(),
        ));
    }

    let profile = ContributorProfile::create(
        &mut conn,
        NewContributorProfile {
            user_id,
            bio: request.bio,
            social_links: request.social_links,
            // Active immediately; articles by this user auto-publish
            status: ContributorStatus::Active.as_str().to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = %user_id, "Contributor profile created");

    Ok(profile)
}

pub async fn get_my_profile(
    pool: &DieselPool,
    user_id: Uuid,
) -> Result<ContributorProfile, ApiError> {
    let mut conn = pool.get().await?;

    ContributorProfile::find_by_user(&mut conn, user_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::ContributorProfile))
}

/// Authoring gate: profile must exist and be ACTIVE.
pub async fn ensure_active_contributor(
    conn: &mut diesel_async::AsyncPgConnection,
    user_id: Uuid,
) -> Result<ContributorProfile, ApiError> {
    let profile = ContributorProfile::find_by_user(conn, user_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::ContributorProfile))?;

    if !profile.is_active() {
        return Err(ApiError::ContributorNotActive);
    }

    Ok(profile)
}
