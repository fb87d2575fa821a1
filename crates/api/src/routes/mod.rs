pub mod admin;
pub mod articles;
pub mod auth;
pub mod authors;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth
///     POST /login                   login
///     POST /refresh                 rotate tokens
///     POST /logout                  end session (auth)
///
/// /articles
///     GET  /                        list, newest first
///     POST /                        create (auth)
///     GET  /search?q=               search
///     GET  /{id}                    display view
///     PUT  /{id}                    edit (owner)
///     GET  /{id}/edit               editor view (auth)
///
/// /authors
///     GET  /{id}/articles           one author's articles
///
/// /admin
///     GET  /authors                 list authors (admin)
///     POST /authors                 provision author (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/articles", articles::router())
        .nest("/authors", authors::router())
        .nest("/admin", admin::router())
}
