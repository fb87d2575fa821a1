//! In-process backend for local development and tests.
//!
//! Mirrors the PostgreSQL schema's guarantees: per-table id sequences, a
//! unique author name, the article-to-author reference and newest-first
//! ordering. Nothing survives a restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use inkpost_core::types::{self, DbId};
use tokio::sync::RwLock;

use super::{
    ArticleStore, AuthorStore, SessionStore, Store, StoreError, StoreResult, FK_ARTICLES_AUTHOR,
    UQ_AUTHORS_NAME,
};
use crate::models::article::{Article, ArticleView, CreateArticle, UpdateArticle};
use crate::models::author::{Author, CreateAuthor};
use crate::models::session::{AuthorSession, CreateSession};

/// [`Store`] holding every table in memory behind a single lock.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    authors: BTreeMap<DbId, Author>,
    articles: BTreeMap<DbId, Article>,
    sessions: BTreeMap<DbId, AuthorSession>,
    last_author_id: DbId,
    last_article_id: DbId,
    last_session_id: DbId,
}

impl Tables {
    fn view(&self, article: &Article) -> ArticleView {
        let author_name = self
            .authors
            .get(&article.author_id)
            .map(|a| a.name.clone())
            .unwrap_or_default();
        ArticleView {
            id: article.id,
            title: article.title.clone(),
            content_html: article.content_html.clone(),
            author_id: article.author_id,
            author_name,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }

    /// Views of the articles accepted by `keep`, newest first.
    fn views_where(&self, keep: impl Fn(&Article) -> bool) -> Vec<ArticleView> {
        let mut matching: Vec<&Article> = self.articles.values().filter(|a| keep(*a)).collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        matching.into_iter().map(|a| self.view(a)).collect()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn create_author(&self, input: &CreateAuthor) -> StoreResult<Author> {
        let mut tables = self.tables.write().await;
        if tables.authors.values().any(|a| a.name == input.name) {
            return Err(StoreError::Conflict {
                constraint: UQ_AUTHORS_NAME.to_string(),
            });
        }
        tables.last_author_id += 1;
        let author = Author {
            id: tables.last_author_id,
            name: input.name.clone(),
            password_hash: input.password_hash.clone(),
            is_admin: input.is_admin,
            created_at: types::now(),
        };
        tables.authors.insert(author.id, author.clone());
        Ok(author)
    }

    async fn find_author_by_id(&self, id: DbId) -> StoreResult<Option<Author>> {
        Ok(self.tables.read().await.authors.get(&id).cloned())
    }

    async fn find_author_by_name(&self, name: &str) -> StoreResult<Option<Author>> {
        let tables = self.tables.read().await;
        Ok(tables.authors.values().find(|a| a.name == name).cloned())
    }

    async fn list_authors(&self) -> StoreResult<Vec<Author>> {
        let tables = self.tables.read().await;
        let mut authors: Vec<Author> = tables.authors.values().cloned().collect();
        authors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(authors)
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn create_article(&self, input: &CreateArticle) -> StoreResult<Article> {
        let mut tables = self.tables.write().await;
        if !tables.authors.contains_key(&input.author_id) {
            return Err(StoreError::MissingReference {
                constraint: FK_ARTICLES_AUTHOR.to_string(),
            });
        }
        tables.last_article_id += 1;
        let article = Article {
            id: tables.last_article_id,
            title: input.title.clone(),
            content_rich: input.content_rich.clone(),
            content_html: input.content_html.clone(),
            content_plain: input.content_plain.clone(),
            author_id: input.author_id,
            created_at: input.created_at,
            updated_at: input.created_at,
        };
        tables.articles.insert(article.id, article.clone());
        Ok(article)
    }

    async fn find_article(&self, id: DbId) -> StoreResult<Option<Article>> {
        Ok(self.tables.read().await.articles.get(&id).cloned())
    }

    async fn find_article_view(&self, id: DbId) -> StoreResult<Option<ArticleView>> {
        let tables = self.tables.read().await;
        Ok(tables.articles.get(&id).map(|a| tables.view(a)))
    }

    async fn update_article(
        &self,
        id: DbId,
        input: &UpdateArticle,
    ) -> StoreResult<Option<Article>> {
        let mut tables = self.tables.write().await;
        let Some(article) = tables.articles.get_mut(&id) else {
            return Ok(None);
        };
        article.title = input.title.clone();
        article.content_rich = input.content_rich.clone();
        article.content_html = input.content_html.clone();
        article.content_plain = input.content_plain.clone();
        article.updated_at = input.updated_at;
        Ok(Some(article.clone()))
    }

    async fn list_articles(&self) -> StoreResult<Vec<ArticleView>> {
        Ok(self.tables.read().await.views_where(|_| true))
    }

    async fn list_articles_by_author(&self, author_id: DbId) -> StoreResult<Vec<ArticleView>> {
        let tables = self.tables.read().await;
        Ok(tables.views_where(|a| a.author_id == author_id))
    }

    async fn search_articles(&self, term: &str) -> StoreResult<Vec<ArticleView>> {
        let needle = term.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables.views_where(|a| {
            a.title.to_lowercase().contains(&needle)
                || a.content_plain.to_lowercase().contains(&needle)
        }))
    }

    async fn count_articles(&self) -> StoreResult<i64> {
        Ok(self.tables.read().await.articles.len() as i64)
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create_session(&self, input: &CreateSession) -> StoreResult<AuthorSession> {
        let now = types::now();
        let mut tables = self.tables.write().await;
        // Revoked and expired sessions can never become active again.
        tables.sessions.retain(|_, s| s.is_active_at(now));
        tables.last_session_id += 1;
        let session = AuthorSession {
            id: tables.last_session_id,
            author_id: input.author_id,
            refresh_token_hash: input.refresh_token_hash.clone(),
            expires_at: input.expires_at,
            is_revoked: false,
            created_at: now,
        };
        tables.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_session_by_refresh_hash(
        &self,
        hash: &str,
    ) -> StoreResult<Option<AuthorSession>> {
        let now = types::now();
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .values()
            .find(|s| s.refresh_token_hash == hash && s.is_active_at(now))
            .cloned())
    }

    async fn find_active_session(&self, id: DbId) -> StoreResult<Option<AuthorSession>> {
        let now = types::now();
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .get(&id)
            .filter(|s| s.is_active_at(now))
            .cloned())
    }

    async fn revoke_session(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.sessions.get_mut(&id) {
            Some(session) if !session.is_revoked => {
                session.is_revoked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
