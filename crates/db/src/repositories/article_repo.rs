//! Repository for the `articles` table and its author-joined read views.

use inkpost_core::types::DbId;
use sqlx::PgPool;

use crate::models::article::{Article, ArticleView, CreateArticle, UpdateArticle};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, content_rich, content_html, content_plain, \
                       author_id, created_at, updated_at";

/// Projection for [`ArticleView`]; expects `articles a JOIN authors au`.
const VIEW_COLUMNS: &str = "a.id, a.title, a.content_html, a.author_id, \
                            au.name AS author_name, a.created_at, a.updated_at";

const VIEW_FROM: &str = "articles a JOIN authors au ON au.id = a.author_id";

/// Newest first; ties broken by id so the order is total.
const VIEW_ORDER: &str = "ORDER BY a.created_at DESC, a.id DESC";

/// Provides CRUD and search operations for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article, returning the created row.
    ///
    /// `updated_at` starts equal to `created_at`.
    pub async fn create(pool: &PgPool, input: &CreateArticle) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles
                (title, content_rich, content_html, content_plain, author_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&input.title)
            .bind(&input.content_rich)
            .bind(&input.content_html)
            .bind(&input.content_plain)
            .bind(input.author_id)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// Find an article by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the public view of an article by ID.
    pub async fn find_view_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ArticleView>, sqlx::Error> {
        let query = format!("SELECT {VIEW_COLUMNS} FROM {VIEW_FROM} WHERE a.id = $1");
        sqlx::query_as::<_, ArticleView>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the content of an article. Author and `created_at` are untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArticle,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE articles SET
                title = $2,
                content_rich = $3,
                content_html = $4,
                content_plain = $5,
                updated_at = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content_rich)
            .bind(&input.content_html)
            .bind(&input.content_plain)
            .bind(input.updated_at)
            .fetch_optional(pool)
            .await
    }

    /// List all articles, newest first.
    pub async fn list_views(pool: &PgPool) -> Result<Vec<ArticleView>, sqlx::Error> {
        let query = format!("SELECT {VIEW_COLUMNS} FROM {VIEW_FROM} {VIEW_ORDER}");
        sqlx::query_as::<_, ArticleView>(&query)
            .fetch_all(pool)
            .await
    }

    /// List one author's articles, newest first.
    pub async fn list_views_by_author(
        pool: &PgPool,
        author_id: DbId,
    ) -> Result<Vec<ArticleView>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM {VIEW_FROM} WHERE a.author_id = $1 {VIEW_ORDER}"
        );
        sqlx::query_as::<_, ArticleView>(&query)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over title and plain-text content,
    /// newest first.
    ///
    /// `%` and `_` in `term` match literally.
    pub async fn search_views(
        pool: &PgPool,
        term: &str,
    ) -> Result<Vec<ArticleView>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM {VIEW_FROM}
             WHERE (a.title ILIKE $1 ESCAPE '\\' OR a.content_plain ILIKE $1 ESCAPE '\\')
             {VIEW_ORDER}"
        );
        sqlx::query_as::<_, ArticleView>(&query)
            .bind(contains_pattern(term))
            .fetch_all(pool)
            .await
    }

    /// Total number of stored articles.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM articles")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}

/// Build a `LIKE` pattern matching `term` anywhere, escaping wildcards.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
