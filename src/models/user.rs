// User database model

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::Serialize;
use uuid::Uuid;

use crate::schema::users;

/// User account row. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Account summary embedded in auth responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

impl User {
    pub async fn find_by_id(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::users::dsl;

        dsl::users
            .filter(dsl::id.eq(user_id))
            .select(User::as_select())
            .first::<User>(conn)
            .await
            .optional()
    }

    /// Login lookup: the identifier may be either the email or the username.
    pub async fn find_by_email_or_username(
        conn: &mut AsyncPgConnection,
        identifier: &str,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::users::dsl;

        dsl::users
            .filter(dsl::email.eq(identifier).or(dsl::username.eq(identifier)))
            .select(User::as_select())
            .first::<User>(conn)
            .await
            .optional()
    }

    /// Registration uniqueness pre-check across both identity columns.
    pub async fn email_or_username_taken(
        conn: &mut AsyncPgConnection,
        email: &str,
        username: &str,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::users::dsl;
        use diesel::dsl::count_star;

        let count: i64 = dsl::users
            .filter(dsl::email.eq(email).or(dsl::username.eq(username)))
            .select(count_star())
            .get_result(conn)
            .await?;

        Ok(count > 0)
    }

    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_user: NewUser,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::users::dsl;

        diesel::insert_into(dsl::users)
            .values(&new_user)
            .get_result::<User>(conn)
            .await
    }

    pub async fn touch_last_login(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
    ) -> Result<(), diesel::result::Error> {
        use crate::schema::users::dsl;

        diesel::update(dsl::users.filter(dsl::id.eq(user_id)))
            .set((
                dsl::last_login_at.eq(Some(Utc::now())),
                dsl::updated_at.eq(Utc::now()),
            ))
            .execute(conn)
            .await?;

        Ok(())
    }

    pub async fn set_active(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
        active: bool,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::users::dsl;

        diesel::update(dsl::users.filter(dsl::id.eq(user_id)))
            .set((dsl::is_active.eq(active), dsl::updated_at.eq(Utc::now())))
            .get_result::<User>(conn)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "Ari Wibowo".to_string(),
            username: "ariw".to_string(),
            email: "ari@example.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = sample_user();
        let json = serde_json::to_value(&user).expect("serialize");
        let obj = json.as_object().unwrap();

        assert!(obj.contains_key("email"));
        assert!(obj.contains_key("isActive"));
        assert!(!obj.contains_key("passwordHash"));
        assert!(!obj.contains_key("password_hash"));
    }

    #[test]
    fn test_user_summary_projection() {
        let user = sample_user();
        let summary = UserSummary::from(&user);
        assert_eq!(summary.id, user.id);
        assert_eq!(summary.username, "ariw");
    }
}
