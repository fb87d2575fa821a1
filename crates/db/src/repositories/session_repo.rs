//! Repository for the `author_sessions` table.

use inkpost_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{AuthorSession, CreateSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, author_id, refresh_token_hash, expires_at, is_revoked, created_at";

/// Provides CRUD operations for author sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSession,
    ) -> Result<AuthorSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO author_sessions (author_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuthorSession>(&query)
            .bind(input.author_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an active session by its refresh token hash.
    ///
    /// Only returns sessions that are not revoked and not expired.
    pub async fn find_by_refresh_token_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<AuthorSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM author_sessions
             WHERE refresh_token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, AuthorSession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Find a session by ID if it is still active.
    pub async fn find_active_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AuthorSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM author_sessions
             WHERE id = $1
               AND is_revoked = false
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, AuthorSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single session. Returns `true` if the row was updated.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE author_sessions SET is_revoked = true WHERE id = $1 AND is_revoked = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
