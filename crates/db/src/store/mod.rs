//! Storage ports shared by every backend.
//!
//! The API layer depends only on these traits, held as `Arc<dyn Store>`, so
//! PostgreSQL and the in-memory backend are interchangeable at startup.

mod memory;
mod pg;

use async_trait::async_trait;
use inkpost_core::types::DbId;

use crate::models::article::{Article, ArticleView, CreateArticle, UpdateArticle};
use crate::models::author::{Author, CreateAuthor};
use crate::models::session::{AuthorSession, CreateSession};

pub use memory::MemoryStore;
pub use pg::PgStore;

/// Unique constraint guarding author names.
pub const UQ_AUTHORS_NAME: &str = "uq_authors_name";

/// Foreign key from articles to their author.
pub const FK_ARTICLES_AUTHOR: &str = "articles_author_id_fkey";

/// Errors raised by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("Unique constraint violated: {constraint}")]
    Conflict { constraint: String },

    /// A referenced row does not exist.
    #[error("Referenced row missing: {constraint}")]
    MissingReference { constraint: String },

    /// Any other backend failure (connection, query, decoding).
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether this error is a unique violation on `constraint`.
    pub fn is_conflict_on(&self, constraint: &str) -> bool {
        matches!(self, StoreError::Conflict { constraint: c } if c == constraint)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            // 23505 = unique_violation, 23503 = foreign_key_violation.
            match db_err.code().as_deref() {
                Some("23505") => return StoreError::Conflict { constraint },
                Some("23503") => return StoreError::MissingReference { constraint },
                _ => {}
            }
        }
        StoreError::Backend(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence port for authors.
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// Insert an author. Duplicate names fail with [`StoreError::Conflict`].
    async fn create_author(&self, input: &CreateAuthor) -> StoreResult<Author>;

    async fn find_author_by_id(&self, id: DbId) -> StoreResult<Option<Author>>;

    /// Exact, case-sensitive lookup.
    async fn find_author_by_name(&self, name: &str) -> StoreResult<Option<Author>>;

    /// All authors, alphabetically.
    async fn list_authors(&self) -> StoreResult<Vec<Author>>;
}

/// Persistence port for articles.
///
/// Every list operation returns views newest first by `created_at`.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn create_article(&self, input: &CreateArticle) -> StoreResult<Article>;

    async fn find_article(&self, id: DbId) -> StoreResult<Option<Article>>;

    async fn find_article_view(&self, id: DbId) -> StoreResult<Option<ArticleView>>;

    /// Replace an article's content. `None` if the article does not exist.
    async fn update_article(
        &self,
        id: DbId,
        input: &UpdateArticle,
    ) -> StoreResult<Option<Article>>;

    async fn list_articles(&self) -> StoreResult<Vec<ArticleView>>;

    async fn list_articles_by_author(&self, author_id: DbId) -> StoreResult<Vec<ArticleView>>;

    /// Case-insensitive substring match on the title or the plain-text
    /// content. Wildcards in `term` are literal.
    async fn search_articles(&self, term: &str) -> StoreResult<Vec<ArticleView>>;

    async fn count_articles(&self) -> StoreResult<i64>;
}

/// Persistence port for refresh-token sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_session(&self, input: &CreateSession) -> StoreResult<AuthorSession>;

    /// Active (unrevoked, unexpired) session holding this refresh token hash.
    async fn find_session_by_refresh_hash(
        &self,
        hash: &str,
    ) -> StoreResult<Option<AuthorSession>>;

    /// Active session by ID.
    async fn find_active_session(&self, id: DbId) -> StoreResult<Option<AuthorSession>>;

    /// Returns `true` if the session was active and is now revoked.
    async fn revoke_session(&self, id: DbId) -> StoreResult<bool>;
}

/// A complete storage backend.
#[async_trait]
pub trait Store: AuthorStore + ArticleStore + SessionStore {
    /// Short backend name for logs and the health endpoint.
    fn backend_name(&self) -> &'static str;

    /// Verify the backend is reachable.
    async fn ping(&self) -> StoreResult<()>;
}
