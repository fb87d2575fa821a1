//! Author session model and DTOs.

use inkpost_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A login session row from the `author_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct AuthorSession {
    pub id: DbId,
    pub author_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
}

impl AuthorSession {
    /// Not revoked and not yet expired at `now`.
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        !self.is_revoked && self.expires_at > now
    }
}

/// DTO for creating a new session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub author_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
