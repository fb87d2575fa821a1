//! Handlers for articles: public reads, search and authoring.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use inkpost_core::types::DbId;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::MaybeAuthUser;
use crate::response::DataResponse;
use crate::services::articles::{self, ArticleLocation};
use crate::state::AppState;

/* --------------------------------------------------------------------------
Request types
-------------------------------------------------------------------------- */

/// Body for creating or editing an article.
#[derive(Debug, Deserialize)]
pub struct ArticleInput {
    pub title: String,
    /// Quill delta document, serialized as JSON text.
    pub content_rich: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/* --------------------------------------------------------------------------
Public reads
-------------------------------------------------------------------------- */

/// GET /articles
///
/// All articles, newest first.
pub async fn list_articles(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let articles = articles::list(&*state.store).await?;
    Ok(Json(DataResponse { data: articles }))
}

/// GET /articles/search?q=
///
/// Case-insensitive substring search over title and text, newest first.
pub async fn search_articles(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let term = params.q.unwrap_or_default();
    let articles = articles::search(&*state.store, &term).await?;
    Ok(Json(DataResponse { data: articles }))
}

/// GET /articles/{id}
///
/// Rendered article with its author's name.
pub async fn get_article(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path?;
    let article = articles::fetch_for_display(&*state.store, auth.principal(), id).await?;
    Ok(Json(DataResponse { data: article }))
}

/// GET /authors/{id}/articles
pub async fn list_author_articles(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(author_id) = path?;
    let articles = articles::list_by_author(&*state.store, author_id).await?;
    Ok(Json(DataResponse { data: articles }))
}

/* --------------------------------------------------------------------------
Authoring
-------------------------------------------------------------------------- */

/// POST /articles
///
/// Create an article owned by the caller. Returns 201 with its location.
pub async fn create_article(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    payload: Result<Json<ArticleInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let article = articles::create(
        &*state.store,
        auth.principal(),
        &input.title,
        &input.content_rich,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ArticleLocation::of(article.id),
        }),
    ))
}

/// GET /articles/{id}/edit
///
/// Title and raw rich content for the editor.
pub async fn get_article_for_edit(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path?;
    let draft = articles::fetch_for_edit(&*state.store, auth.principal(), id).await?;
    Ok(Json(DataResponse { data: draft }))
}

/// PUT /articles/{id}
///
/// Replace title and content. Only the article's author may do this.
pub async fn update_article(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<ArticleInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let article = articles::edit(
        &*state.store,
        auth.principal(),
        id,
        &input.title,
        &input.content_rich,
    )
    .await?;

    Ok(Json(DataResponse {
        data: ArticleLocation::of(article.id),
    }))
}
