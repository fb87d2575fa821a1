//! Handlers for author administration.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use inkpost_db::models::author::AuthorResponse;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::services::provisioning;
use crate::state::AppState;

/// Body for `POST /admin/authors`.
#[derive(Debug, Deserialize)]
pub struct CreateAuthorRequest {
    pub name: String,
    pub password1: String,
    pub password2: String,
}

/// POST /admin/authors
///
/// Provision a new non-admin author. Returns 201 with the author (no hash).
/// Anonymous and non-admin callers are refused with 403.
pub async fn create_author(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    payload: Result<Json<CreateAuthorRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let author = provisioning::provision(
        &*state.store,
        &state.hasher,
        auth.principal(),
        &input.name,
        &input.password1,
        &input.password2,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AuthorResponse::from(&author),
        }),
    ))
}

/// GET /admin/authors
pub async fn list_authors(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let authors: Vec<AuthorResponse> = state
        .store
        .list_authors()
        .await?
        .iter()
        .map(AuthorResponse::from)
        .collect();
    Ok(Json(DataResponse { data: authors }))
}
