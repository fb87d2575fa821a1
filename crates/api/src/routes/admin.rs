//! Route definitions for the `/admin` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET  /authors  -> list_authors (admin)
/// POST /authors  -> create_author (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/authors",
        get(admin::list_authors).post(admin::create_author),
    )
}
