//! Handlers for the `/auth` resource (login, refresh, logout).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use inkpost_core::error::CoreError;
use inkpost_core::roles::Role;
use inkpost_core::types::DbId;
use inkpost_db::models::session::{AuthorSession, CreateSession};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::principal::Principal;
use crate::auth::verifier::authenticate;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub author: AuthorInfo,
}

/// Public author info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct AuthorInfo {
    pub id: DbId,
    pub name: String,
    pub roles: Vec<Role>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with name + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<AuthResponse>> {
    let Json(input) = payload?;

    let principal = authenticate(&*state.store, &state.hasher, &input.name, &input.password).await?;
    let response = create_auth_response(&state, &principal).await?;

    tracing::info!(author_id = principal.author_id, "Login succeeded");
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> AppResult<Json<AuthResponse>> {
    let Json(input) = payload?;
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = state
        .store
        .find_session_by_refresh_hash(&token_hash)
        .await?
        .ok_or_else(refresh_rejected)?;

    let response = rotate_session(&state, &session).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// End the caller's session. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    state.store.revoke_session(auth_user.session_id).await?;
    tracing::info!(
        author_id = auth_user.principal.author_id,
        session_id = auth_user.session_id,
        "Logged out",
    );
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn refresh_rejected() -> AppError {
    AppError::Core(CoreError::Unauthenticated(
        "Invalid or expired refresh token".into(),
    ))
}

/// Revoke `session` and issue a replacement for its author.
///
/// Only the caller whose revoke actually ends the session gets new tokens,
/// so a refresh token is redeemed at most once.
async fn rotate_session(state: &AppState, session: &AuthorSession) -> AppResult<AuthResponse> {
    if !state.store.revoke_session(session.id).await? {
        tracing::warn!(session_id = session.id, "Refresh token already redeemed");
        return Err(refresh_rejected());
    }

    let author = state
        .store
        .find_author_by_id(session.author_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthenticated("Author no longer exists".into()))
        })?;

    create_auth_response(state, &Principal::for_author(&author)).await
}

/// Persist a session row, mint its tokens and build the response.
async fn create_auth_response(state: &AppState, principal: &Principal) -> AppResult<AuthResponse> {
    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session = state
        .store
        .create_session(&CreateSession {
            author_id: principal.author_id,
            refresh_token_hash: refresh_hash,
            expires_at,
        })
        .await?;

    let access_token = generate_access_token(principal, session.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        author: AuthorInfo {
            id: principal.author_id,
            name: principal.name.clone(),
            roles: principal.roles().collect(),
        },
    })
}
