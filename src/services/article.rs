// Article service
// Public listings expose PUBLISHED articles ordered by publish time; authors
// edit content fields, admins drive the status machine.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::DieselPool;
use crate::models::article::{
    Article, ArticleChangeset, ArticleStatus, ArticleWithAuthor, CreateArticleRequest, NewArticle,
    UpdateArticleRequest,
};
use crate::models::pagination::{Page, PageMeta};
use crate::models::status::EntityStatus;
use crate::models::user::{User, UserSummary};
use crate::schema::{articles, users};
use crate::services::contributor::ensure_active_contributor;
use crate::utils::api_error::{ApiError, Entity};
use crate::utils::slug::time_suffixed_slug;
use crate::utils::validation::RequiredFields;

/// Public article listing: PUBLISHED only, newest publish date first.
pub async fn list_published(
    pool: &DieselPool,
    q: Option<String>,
    page: Page,
) -> Result<(Vec<ArticleWithAuthor>, PageMeta), ApiError> {
    let mut conn = pool.get().await?;

    let mut query = articles::table
        .inner_join(users::table)
        .filter(articles::status.eq(ArticleStatus::Published.as_str()))
        .select((Article::as_select(), User::as_select()))
        .into_boxed();

    let mut count_query = articles::table
        .inner_join(users::table)
        .filter(articles::status.eq(ArticleStatus::Published.as_str()))
        .into_boxed();

    if let Some(ref q) = q {
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

    let rows = query
        .order(articles::published_at.desc())
        .limit(page.limit)
        .offset(page.offset())
        .load::<(Article, User)>(&mut conn)
        .await?;

    let items = rows
        .into_iter()
        .map(|(article, author)| ArticleWithAuthor {
            article,
            author: UserSummary::from(&author),
        })
        .collect();

    Ok((items, page.meta(total_items)))
}

pub async fn list_my_articles(
    pool: &DieselPool,
    author_id: Uuid,
    page: Page,
) -> Result<(Vec<Article>, PageMeta), ApiError> {
    let mut conn = pool.get().await?;

    let total_items: i64 = articles::table
        .filter(articles::author_id.eq(author_id))
        .count()
        .get_result(&mut conn)
        .await?;

    let items = articles::table
        .filter(articles::author_id.eq(author_id))
        .order(articles::created_at.desc())
        .limit(page.limit)
        .offset(page.offset())
        .select(Article::as_select())
        .load::<Article>(&mut conn)
        .await?;

    Ok((items, page.meta(total_items)))
}

/// Create and auto-publish; the author must be an active contributor.
pub async fn create_article(
    pool: &DieselPool,
    author_id: Uuid,
    request: CreateArticleRequest,
) -> Result<Article, ApiError> {
    let mut fields = RequiredFields::new();
    fields
        .require_str("title", request.title.as_ref(), "Title is required")
        .require_str("content", request.content.as_ref(), "Content is required");
    fields.check()?;

    let mut conn = pool.get().await?;

    ensure_active_contributor(&mut conn, author_id).await?;

    let title = request.title.unwrap_or_default();
    let slug = time_suffixed_slug(&title);

    let article = Article::create(
        &mut conn,
        NewArticle {
            author_id,
            title,
            slug,
            excerpt: request.excerpt,
            content: request.content.unwrap_or_default(),
            cover_image_url: request.cover_image_url,
            status: ArticleStatus::Published.as_str().to_string(),
            published_at: Some(Utc::now()),
        },
    )
    .await?;

    tracing::info!(article_id = %article.id, author_id = %author_id, "Article published");

    Ok(article)
}

/// Public detail by id or slug; anything not PUBLISHED reads as missing.
pub async fn get_public(pool: &DieselPool, id_or_slug: &str) -> Result<ArticleWithAuthor, ApiError> {
    let mut conn = pool.get().await?;

    let article = match Uuid::parse_str(id_or_slug) {
        Ok(id) => Article::find_by_id(&mut conn, id).await?,
        Err(_) => Article::find_by_slug(&mut conn, id_or_slug).await?,
    };

    let article = article
        .filter(|a| a.status == ArticleStatus::Published.as_str())
        .ok_or(ApiError::NotFound(Entity::Article))?;

    let author = User::find_by_id(&mut conn, article.author_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::User))?;

    Ok(ArticleWithAuthor {
        author: UserSummary::from(&author),
        article,
    })
}

/// Content-field update by the author. Status is not touchable here.
pub async fn update_article(
    pool: &DieselPool,
    author_id: Uuid,
    article_id: Uuid,
    request: UpdateArticleRequest,
) -> Result<Article, ApiError> {
    let mut conn = pool.get().await?;

    let existing = Article::find_owned(&mut conn, article_id, author_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::Article))?;

    let changes = ArticleChangeset {
        title: request.title,
        excerpt: request.excerpt,
        content: request.content,
        cover_image_url: request.cover_image_url,
        updated_at: Utc::now(),
    };

    Ok(Article::update_fields(&mut conn, existing.id, changes).await?)
}

/// Admin status change. `published_at` is stamped only on the first entry
/// into PUBLISHED and survives later round trips through other statuses.
pub async fn change_status(
    pool: &DieselPool,
    article_id: Uuid,
    requested_status: &str,
) -> Result<Article, ApiError> {
    let status = ArticleStatus::parse_request(requested_status)?;

    let mut conn = pool.get().await?;

    let existing = Article::find_by_id(&mut conn, article_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::Article))?;

    let stamp_published_at =
        status == ArticleStatus::Published && existing.published_at.is_none();

    Ok(Article::set_status(&mut conn, existing.id, status, stamp_published_at).await?)
}
