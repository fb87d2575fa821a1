//! PostgreSQL backend built on the zero-sized repositories.

use async_trait::async_trait;
use inkpost_core::types::DbId;

use super::{ArticleStore, AuthorStore, SessionStore, Store, StoreResult};
use crate::models::article::{Article, ArticleView, CreateArticle, UpdateArticle};
use crate::models::author::{Author, CreateAuthor};
use crate::models::session::{AuthorSession, CreateSession};
use crate::repositories::{ArticleRepo, AuthorRepo, SessionRepo};
use crate::DbPool;

/// [`Store`] backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl AuthorStore for PgStore {
    async fn create_author(&self, input: &CreateAuthor) -> StoreResult<Author> {
        Ok(AuthorRepo::create(&self.pool, input).await?)
    }

    async fn find_author_by_id(&self, id: DbId) -> StoreResult<Option<Author>> {
        Ok(AuthorRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_author_by_name(&self, name: &str) -> StoreResult<Option<Author>> {
        Ok(AuthorRepo::find_by_name(&self.pool, name).await?)
    }

    async fn list_authors(&self) -> StoreResult<Vec<Author>> {
        Ok(AuthorRepo::list(&self.pool).await?)
    }
}

#[async_trait]
impl ArticleStore for PgStore {
    async fn create_article(&self, input: &CreateArticle) -> StoreResult<Article> {
        Ok(ArticleRepo::create(&self.pool, input).await?)
    }

    async fn find_article(&self, id: DbId) -> StoreResult<Option<Article>> {
        Ok(ArticleRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_article_view(&self, id: DbId) -> StoreResult<Option<ArticleView>> {
        Ok(ArticleRepo::find_view_by_id(&self.pool, id).await?)
    }

    async fn update_article(
        &self,
        id: DbId,
        input: &UpdateArticle,
    ) -> StoreResult<Option<Article>> {
        Ok(ArticleRepo::update(&self.pool, id, input).await?)
    }

    async fn list_articles(&self) -> StoreResult<Vec<ArticleView>> {
        Ok(ArticleRepo::list_views(&self.pool).await?)
    }

    async fn list_articles_by_author(&self, author_id: DbId) -> StoreResult<Vec<ArticleView>> {
        Ok(ArticleRepo::list_views_by_author(&self.pool, author_id).await?)
    }

    async fn search_articles(&self, term: &str) -> StoreResult<Vec<ArticleView>> {
        Ok(ArticleRepo::search_views(&self.pool, term).await?)
    }

    async fn count_articles(&self) -> StoreResult<i64> {
        Ok(ArticleRepo::count(&self.pool).await?)
    }
}

#[async_trait]
impl SessionStore for PgStore {
    async fn create_session(&self, input: &CreateSession) -> StoreResult<AuthorSession> {
        Ok(SessionRepo::create(&self.pool, input).await?)
    }

    async fn find_session_by_refresh_hash(
        &self,
        hash: &str,
    ) -> StoreResult<Option<AuthorSession>> {
        Ok(SessionRepo::find_by_refresh_token_hash(&self.pool, hash).await?)
    }

    async fn find_active_session(&self, id: DbId) -> StoreResult<Option<AuthorSession>> {
        Ok(SessionRepo::find_active_by_id(&self.pool, id).await?)
    }

    async fn revoke_session(&self, id: DbId) -> StoreResult<bool> {
        Ok(SessionRepo::revoke(&self.pool, id).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
