//! JWT-based authentication extractors for Axum handlers.
//!
//! A token is only honoured while its login session (`sid`) is active, so
//! logging out invalidates outstanding access tokens immediately.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use inkpost_core::error::CoreError;
use inkpost_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::auth::principal::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated author extracted from a JWT Bearer token in the `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(author_id = user.principal.author_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub principal: Principal,
    /// Login session the token was issued for.
    pub session_id: DbId,
}

/// Outcome of inspecting the `Authorization` header.
enum Credentials {
    Missing,
    Rejected(&'static str),
    Valid(AuthUser),
}

async fn inspect(parts: &Parts, state: &AppState) -> Result<Credentials, AppError> {
    let Some(header) = parts.headers.get("authorization") else {
        return Ok(Credentials::Missing);
    };

    let Some(token) = header.to_str().ok().and_then(|h| h.strip_prefix("Bearer ")) else {
        return Ok(Credentials::Rejected(
            "Invalid Authorization format. Expected: Bearer <token>",
        ));
    };

    let Ok(claims) = validate_token(token, &state.config.jwt) else {
        return Ok(Credentials::Rejected("Invalid or expired token"));
    };

    let session = state.store.find_active_session(claims.sid).await?;
    if !session.is_some_and(|s| s.author_id == claims.sub) {
        return Ok(Credentials::Rejected("Session has ended"));
    }

    Ok(Credentials::Valid(AuthUser {
        principal: claims.principal(),
        session_id: claims.sid,
    }))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match inspect(parts, state).await? {
            Credentials::Valid(user) => Ok(user),
            Credentials::Missing => Err(AppError::Core(CoreError::Unauthenticated(
                "Missing Authorization header".into(),
            ))),
            Credentials::Rejected(reason) => {
                Err(AppError::Core(CoreError::Unauthenticated(reason.into())))
            }
        }
    }
}

/// Optional authentication: `Some` for a valid token, `None` otherwise.
///
/// Lets the article and provisioning services decide how an anonymous
/// caller is refused.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl MaybeAuthUser {
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref().map(|user| &user.principal)
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match inspect(parts, state).await? {
            Credentials::Valid(user) => Ok(MaybeAuthUser(Some(user))),
            Credentials::Missing => Ok(MaybeAuthUser(None)),
            Credentials::Rejected(reason) => {
                tracing::debug!(reason, "Treating request as anonymous");
                Ok(MaybeAuthUser(None))
            }
        }
    }
}
