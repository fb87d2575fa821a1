use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use inkpost_core::error::CoreError;
use inkpost_db::store::StoreError;
use serde_json::json;

/// Why a login attempt was rejected.
///
/// Both variants render the same message and status so a client cannot tell
/// an unknown name from a wrong password.
#[derive(Debug, thiserror::Error)]
pub enum AuthFailure {
    #[error("Invalid name or password")]
    UnknownPrincipal,

    #[error("Invalid name or password")]
    InvalidCredential,
}

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `inkpost_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage backend error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A rejected login.
    #[error(transparent)]
    Auth(#[from] AuthFailure),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Core(CoreError::Validation(format!(
            "Invalid path parameter: {}",
            rejection.body_text()
        )))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Core(CoreError::Serialization(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Serialization(msg) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("Malformed payload: {msg}"),
                ),
                CoreError::Unauthenticated(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", msg.clone())
                }
                CoreError::InvalidCredential => (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_CREDENTIAL",
                    core.to_string(),
                ),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::CorruptCredential(msg) => {
                    tracing::error!(error = %msg, "Corrupt stored credential");
                    internal()
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Storage errors ---
            AppError::Store(err) => match err {
                StoreError::Conflict { constraint } => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                ),
                StoreError::MissingReference { constraint } => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Referenced record does not exist: {constraint}"),
                ),
                StoreError::Backend(msg) => {
                    tracing::error!(error = %msg, "Storage error");
                    internal()
                }
            },

            // --- Login failures ---
            AppError::Auth(failure) => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIAL",
                failure.to_string(),
            ),

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
