// Article model
// Articles are authored by active contributors and auto-published on create.
// `published_at` is written once, on the first transition into PUBLISHED.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::status::EntityStatus;
use crate::models::user::UserSummary;
use crate::schema::articles;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticleStatus {
    Published,
    Suspended,
    Archived,
}

impl EntityStatus for ArticleStatus {
    const ALLOWED: &'static [&'static str] = &["PUBLISHED", "SUSPENDED", "ARCHIVED"];

    fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Published => "PUBLISHED",
            ArticleStatus::Suspended => "SUSPENDED",
            ArticleStatus::Archived => "ARCHIVED",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        match s {
            "PUBLISHED" => Some(ArticleStatus::Published),
            "SUSPENDED" => Some(ArticleStatus::Suspended),
            "ARCHIVED" => Some(ArticleStatus::Archived),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image_url: Option<String>,
    pub status: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = articles)]
pub struct NewArticle {
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image_url: Option<String>,
    pub status: String,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleWithAuthor {
    #[serde(flatten)]
    pub article: Article,
    pub author: UserSummary,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub cover_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub cover_image_url: Option<String>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = articles)]
pub struct ArticleChangeset {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub cover_image_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_article: NewArticle,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::articles::dsl;

        diesel::insert_into(dsl::articles)
            .values(&new_article)
            .get_result::<Article>(conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut AsyncPgConnection,
        article_id: Uuid,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::articles::dsl;

        dsl::articles
            .filter(dsl::id.eq(article_id))
            .select(Article::as_select())
            .first::<Article>(conn)
            .await
            .optional()
    }

    pub async fn find_by_slug(
        conn: &mut AsyncPgConnection,
        slug_value: &str,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::articles::dsl;

        dsl::articles
            .filter(dsl::slug.eq(slug_value))
            .select(Article::as_select())
            .first::<Article>(conn)
            .await
            .optional()
    }

    /// Author-scoped lookup; mismatch reads as missing.
    pub async fn find_owned(
        conn: &mut AsyncPgConnection,
        article_id: Uuid,
        author_id: Uuid,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::articles::dsl;

        dsl::articles
            .filter(dsl::id.eq(article_id))
            .filter(dsl::author_id.eq(author_id))
            .select(Article::as_select())
            .first::<Article>(conn)
            .await
            .optional()
    }

    pub async fn update_fields(
        conn: &mut AsyncPgConnection,
        article_id: Uuid,
        changes: ArticleChangeset,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::articles::dsl;

        diesel::update(dsl::articles.filter(dsl::id.eq(article_id)))
            .set(&changes)
            .get_result::<Article>(conn)
            .await
    }

    /// Persist a status change; `published_at` is only written when the
    /// article first enters PUBLISHED.
    pub async fn set_status(
        conn: &mut AsyncPgConnection,
        article_id: Uuid,
        status: ArticleStatus,
        stamp_published_at: bool,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::articles::dsl;

        if stamp_published_at {
            diesel::update(dsl::articles.filter(dsl::id.eq(article_id)))
                .set((
                    dsl::status.eq(status.as_str()),
                    dsl::published_at.eq(Some(Utc::now())),
                    dsl::updated_at.eq(Utc::now()),
                ))
                .get_result::<Article>(conn)
                .await
        } else {
            diesel::update(dsl::articles.filter(dsl::id.eq(article_id)))
                .set((
                    dsl::status.eq(status.as_str()),
                    dsl::updated_at.eq(Utc::now()),
                ))
                .get_result::<Article>(conn)
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_status_set() {
        assert_eq!(ArticleStatus::Published.as_str(), "PUBLISHED");
        assert_eq!(
            ArticleStatus::from_str("SUSPENDED"),
            Some(ArticleStatus::Suspended)
        );
        assert_eq!(ArticleStatus::from_str("DRAFT"), None);

        let err = ArticleStatus::parse_request("DRAFT").unwrap_err();
        match err {
            crate::utils::api_error::ApiError::Validation { details, .. } => {
                assert_eq!(
                    details[0].message,
                    "Status must be one of PUBLISHED, SUSPENDED, ARCHIVED"
                );
            },
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}
