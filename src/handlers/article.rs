// Article handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    app::AppState,
    middleware::auth::AuthenticatedUser,
    models::article::{Article, ArticleWithAuthor, CreateArticleRequest, UpdateArticleRequest},
    models::pagination::{default_limit, default_page, Page},
    services::article,
    utils::{api_error::ApiError, api_response::ApiSuccess},
};

#[derive(Debug, Deserialize)]
pub struct ListArticlesQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: Option<String>,
}

/// GET /api/articles
pub async fn get_articles(
    State(state): State<AppState>,
    Query(query): Query<ListArticlesQuery>,
) -> Result<ApiSuccess<Vec<ArticleWithAuthor>>, ApiError> {
    let page = Page::new(query.page, query.limit);

    let (items, meta) = article::list_published(&state.db_pool, query.q, page).await?;

    Ok(ApiSuccess::paginated(
        "Articles fetched successfully",
        items,
        meta,
    ))
}

/// GET /api/articles/me/list
pub async fn get_my_articles(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> Result<ApiSuccess<Vec<Article>>, ApiError> {
    let page = Page::new(query.page, query.limit);

    let (items, meta) = article::list_my_articles(&state.db_pool, user.id, page).await?;

    Ok(ApiSuccess::paginated(
        "Articles fetched successfully",
        items,
        meta,
    ))
}

/// POST /api/articles
pub async fn create_article(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateArticleRequest>,
) -> Result<ApiSuccess<Article>, ApiError> {
    let created = article::create_article(&state.db_pool, user.id, request).await?;

    Ok(ApiSuccess::created("Article created successfully", created))
}

/// GET /api/articles/{idOrSlug}
pub async fn get_article_detail(
    State(state): State<AppState>,
    Path(id_or_slug): Path<String>,
) -> Result<ApiSuccess<ArticleWithAuthor>, ApiError> {
    let found = article::get_public(&state.db_pool, &id_or_slug).await?;

    Ok(ApiSuccess::ok("Article fetched successfully", found))
}

/// PATCH /api/articles/{id}
pub async fn update_article(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateArticleRequest>,
) -> Result<ApiSuccess<Article>, ApiError> {
    let updated = article::update_article(&state.db_pool, user.id, id, request).await?;

    Ok(ApiSuccess::ok("Article updated successfully", updated))
}

/// PATCH /api/articles/{id}/status (admin)
pub async fn change_article_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusBody>,
) -> Result<ApiSuccess<Article>, ApiError> {
    let status = body
        .status
        .ok_or_else(|| ApiError::validation_field("status", "Status is required"))?;

    let updated = article::change_status(&state.db_pool, id, &status).await?;

    Ok(ApiSuccess::ok("Article status updated successfully", updated))
}
