//! Article entity model, read views and DTOs.

use inkpost_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full article row from the `articles` table.
#[derive(Debug, Clone, FromRow)]
pub struct Article {
    pub id: DbId,
    pub title: String,
    /// Raw editor document (Quill delta JSON) as submitted.
    pub content_rich: String,
    /// Sanitized HTML rendered from `content_rich`.
    pub content_html: String,
    pub content_plain: String,
    pub author_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public read view of an article, joined with its author's name.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ArticleView {
    pub id: DbId,
    pub title: String,
    pub content_html: String,
    pub author_id: DbId,
    pub author_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for inserting a new article.
#[derive(Debug, Clone)]
pub struct CreateArticle {
    pub title: String,
    pub content_rich: String,
    pub content_html: String,
    pub content_plain: String,
    pub author_id: DbId,
    pub created_at: Timestamp,
}

/// Replacement content for an existing article.
#[derive(Debug, Clone)]
pub struct UpdateArticle {
    pub title: String,
    pub content_rich: String,
    pub content_html: String,
    pub content_plain: String,
    pub updated_at: Timestamp,
}
