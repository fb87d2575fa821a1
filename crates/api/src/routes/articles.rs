//! Route definitions for the `/articles` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::articles;
use crate::state::AppState;

/// Routes mounted at `/articles`.
///
/// ```text
/// GET  /             -> list_articles
/// POST /             -> create_article
/// GET  /search       -> search_articles
/// GET  /{id}         -> get_article
/// PUT  /{id}         -> update_article
/// GET  /{id}/edit    -> get_article_for_edit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(articles::list_articles).post(articles::create_article),
        )
        .route("/search", get(articles::search_articles))
        .route(
            "/{id}",
            get(articles::get_article).put(articles::update_article),
        )
        .route("/{id}/edit", get(articles::get_article_for_edit))
}
