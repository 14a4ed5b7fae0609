// Registration, login and token refresh

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::DieselPool;
use crate::models::auth_token::AuthToken;
use crate::models::role::Role;
use crate::models::user::{NewUser, User};
use crate::services::jwt::JwtService;
use crate::utils::api_error::ApiError;
use crate::utils::password::{hash_password, verify_password};

/// Everything issued by a successful login.
pub struct LoginOutcome {
    pub user: User,
    pub roles: Vec<String>,
    pub access_token: String,
    pub refresh_token: String,
}

/// A refreshed session: new access token, roles re-read from the store.
pub struct RefreshOutcome {
    pub user: User,
    pub access_token: String,
}

pub async fn register_user(
    pool: &DieselPool,
    name: String,
    username: String,
    email: String,
    password: String,
) -> Result<User, ApiError> {
    let mut conn = pool.get().await?;

    if User::email_or_username_taken(&mut conn, &email, &username).await? {
        return Err(ApiError::EmailOrUsernameTaken);
    }

    let password_hash = hash_password(&password)?;

    let user = User::create(
        &mut conn,
        NewUser {
            name,
            username,
            email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(user)
}

pub async fn login_user(
    pool: &DieselPool,
    jwt_service: &JwtService,
    email_or_username: &str,
    password: &str,
) -> Result<LoginOutcome, ApiError> {
    let mut conn = pool.get().await?;

    // Unknown identifier and wrong password are indistinguishable to callers
    let user = User::find_by_email_or_username(&mut conn, email_or_username)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(password, &user.password_hash)? {
        return Err(ApiError::InvalidCredentials);
    }

    let roles = Role::codes_for_user(&mut conn, user.id).await?;

    let access_token = jwt_service.generate_access_token(&user, &roles)?;
    let (refresh_token, refresh_claims) = jwt_service.generate_refresh_token(user.id)?;

    let expires_at = epoch_to_datetime(refresh_claims.exp);
    AuthToken::store_refresh(&mut conn, user.id, &refresh_token, expires_at).await?;

    User::touch_last_login(&mut conn, user.id).await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(LoginOutcome {
        user,
        roles,
        access_token,
        refresh_token,
    })
}

/// Exchange a refresh token for a new access token. The raw token must still
/// exist in the store non-revoked and verify cryptographically; role codes are
/// re-derived from the store rather than trusted from the old token.
pub async fn refresh_access_token(
    pool: &DieselPool,
    jwt_service: &JwtService,
    raw_refresh_token: &str,
) -> Result<RefreshOutcome, ApiError> {
    let mut conn = pool.get().await?;

    let stored = AuthToken::find_active_refresh(&mut conn, raw_refresh_token)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if jwt_service.validate_refresh_token(raw_refresh_token).is_err() {
        return Err(ApiError::Unauthorized);
    }

    let user = User::find_by_id(&mut conn, stored.user_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let roles = Role::codes_for_user(&mut conn, user.id).await?;
    let access_token = jwt_service.generate_access_token(&user, &roles)?;

    Ok(RefreshOutcome { user, access_token })
}

fn epoch_to_datetime(epoch_seconds: u64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(epoch_seconds as i64, 0).unwrap_or_else(Utc::now)
}

/// Load the role objects for a user, used by admin detail responses.
pub async fn roles_for_user(pool: &DieselPool, user_id: Uuid) -> Result<Vec<Role>, ApiError> {
    let mut conn = pool.get().await?;
    Ok(Role::for_user(&mut conn, user_id).await?)
}
