//! Repository for the `authors` table.

use inkpost_core::types::DbId;
use sqlx::PgPool;

use crate::models::author::{Author, CreateAuthor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, password_hash, is_admin, created_at";

/// Provides CRUD operations for authors.
pub struct AuthorRepo;

impl AuthorRepo {
    /// Insert a new author, returning the created row.
    ///
    /// Fails with a unique violation on `uq_authors_name` if the name is taken.
    pub async fn create(pool: &PgPool, input: &CreateAuthor) -> Result<Author, sqlx::Error> {
        let query = format!(
            "INSERT INTO authors (name, password_hash, is_admin)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Author>(&query)
            .bind(&input.name)
            .bind(&input.password_hash)
            .bind(input.is_admin)
            .fetch_one(pool)
            .await
    }

    /// Find an author by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Author>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM authors WHERE id = $1");
        sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an author by name (case-sensitive, exact match).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Author>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM authors WHERE name = $1");
        sqlx::query_as::<_, Author>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all authors alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Author>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM authors ORDER BY name ASC");
        sqlx::query_as::<_, Author>(&query).fetch_all(pool).await
    }
}
