// Persisted refresh tokens
// Raw refresh JWTs are hashed with SHA-256 before storage so a database leak
// does not hand out usable credentials. Revocation is a flag, never a delete.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::schema::auth_tokens;

pub const REFRESH_TOKEN_TYPE: &str = "REFRESH";

#[derive(Debug, Clone, Serialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = auth_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = auth_tokens)]
pub struct NewAuthToken {
    pub user_id: Uuid,
    pub token_hash: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    /// SHA-256 hex digest of the raw token value.
    pub fn hash_token(raw: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(raw.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Persist a freshly issued refresh token.
    pub async fn store_refresh(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
        raw_token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::auth_tokens::dsl;

        let new_token = NewAuthToken {
            user_id,
            token_hash: Self::hash_token(raw_token),
            token_type: REFRESH_TOKEN_TYPE.to_string(),
            expires_at,
        };

        diesel::insert_into(dsl::auth_tokens)
            .values(&new_token)
            .get_result::<AuthToken>(conn)
            .await
    }

    /// Look up a non-revoked refresh token by its raw value.
    pub async fn find_active_refresh(
        conn: &mut AsyncPgConnection,
        raw_token: &str,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::auth_tokens::dsl;

        dsl::auth_tokens
            .filter(dsl::token_hash.eq(Self::hash_token(raw_token)))
            .filter(dsl::token_type.eq(REFRESH_TOKEN_TYPE))
            .filter(dsl::revoked.eq(false))
            .select(AuthToken::as_select())
            .first::<AuthToken>(conn)
            .await
            .optional()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_is_deterministic_hex() {
        let a = AuthToken::hash_token("header.payload.signature");
        let b = AuthToken::hash_token("header.payload.signature");
        let c = AuthToken::hash_token("other.token.value");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
    }
}
