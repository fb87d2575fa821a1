//! Route definitions for the public `/authors` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::articles;
use crate::state::AppState;

/// Routes mounted at `/authors`.
///
/// ```text
/// GET /{id}/articles  -> list_author_articles
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/articles", get(articles::list_author_articles))
}
