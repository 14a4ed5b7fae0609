// Role reference model and user-role membership queries

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::Serialize;
use uuid::Uuid;

use crate::schema::{roles, user_roles};

/// Role code granting administrative access.
pub const ADMIN_ROLE: &str = "ADMIN";

#[derive(Debug, Clone, Serialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: Uuid,
    pub code: String,
    pub label: String,
}

impl Role {
    /// Role codes held by a user, read fresh from the store. Token refresh
    /// re-derives these rather than trusting the stale token payload.
    pub async fn codes_for_user(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
    ) -> Result<Vec<String>, diesel::result::Error> {
        user_roles::table
            .inner_join(roles::table)
            .filter(user_roles::user_id.eq(user_id))
            .select(roles::code)
            .load::<String>(conn)
            .await
    }

    pub async fn for_user(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
    ) -> Result<Vec<Role>, diesel::result::Error> {
        user_roles::table
            .inner_join(roles::table)
            .filter(user_roles::user_id.eq(user_id))
            .select(Role::as_select())
            .load::<Role>(conn)
            .await
    }
}
