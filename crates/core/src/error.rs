use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Login rejected. Carries no detail so callers cannot tell an unknown
    /// name from a wrong password.
    #[error("Invalid name or password")]
    InvalidCredential,

    /// A stored credential could not be parsed. Signals misconfiguration or
    /// data corruption rather than bad user input.
    #[error("Corrupt credential: {0}")]
    CorruptCredential(String),

    #[error("Payload could not be parsed: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
