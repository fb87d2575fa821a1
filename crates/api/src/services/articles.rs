//! Article lifecycle: create, edit, fetch and search.
//!
//! Every write renders the submitted rich content, sanitizes the resulting
//! HTML and stores all three representations together.

use inkpost_core::delta;
use inkpost_core::error::CoreError;
use inkpost_core::sanitize::sanitize;
use inkpost_core::types::{self, DbId};
use inkpost_core::validation::{validate_search_term, validate_title};
use inkpost_db::models::article::{Article, ArticleView, CreateArticle, UpdateArticle};
use inkpost_db::store::{ArticleStore, AuthorStore, StoreError};
use serde::Serialize;

use crate::auth::access;
use crate::auth::principal::Principal;
use crate::error::{AppError, AppResult};

/// Location of a created or edited article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleLocation {
    pub id: DbId,
    pub path: String,
}

impl ArticleLocation {
    pub fn of(id: DbId) -> Self {
        Self {
            id,
            path: format!("/api/v1/articles/{id}"),
        }
    }
}

/// Editable form of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleDraft {
    pub title: String,
    pub content_rich: String,
}

/// Rendered, sanitized content ready to persist.
struct PreparedContent {
    title: String,
    content_rich: String,
    content_html: String,
    content_plain: String,
}

fn prepare(title: &str, content_rich: &str) -> Result<PreparedContent, CoreError> {
    let title = validate_title(title)?;
    let rendered = delta::render(content_rich)?;
    Ok(PreparedContent {
        title: title.to_string(),
        content_rich: content_rich.to_string(),
        content_html: sanitize(&rendered.html),
        content_plain: rendered.plain,
    })
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Article",
        id,
    })
}

/// Create an article owned by the calling author.
pub async fn create<S>(
    store: &S,
    principal: Option<&Principal>,
    title: &str,
    content_rich: &str,
) -> AppResult<Article>
where
    S: AuthorStore + ArticleStore + ?Sized,
{
    let principal = match principal {
        Some(p) if access::can_create_article(Some(p)) => p,
        _ => {
            return Err(AppError::Core(CoreError::Unauthenticated(
                "Login required to create articles".into(),
            )))
        }
    };

    let content = prepare(title, content_rich)?;

    if store.find_author_by_id(principal.author_id).await?.is_none() {
        tracing::warn!(author_id = principal.author_id, "Create by unknown author refused");
        return Err(author_gone());
    }

    let input = CreateArticle {
        title: content.title,
        content_rich: content.content_rich,
        content_html: content.content_html,
        content_plain: content.content_plain,
        author_id: principal.author_id,
        created_at: types::now(),
    };
    let article = store.create_article(&input).await.map_err(|e| match e {
        StoreError::MissingReference { .. } => author_gone(),
        other => other.into(),
    })?;

    tracing::info!(
        article_id = article.id,
        author_id = article.author_id,
        "Article created",
    );
    Ok(article)
}

fn author_gone() -> AppError {
    AppError::Core(CoreError::Forbidden(
        "Author account no longer exists".into(),
    ))
}

/// Replace an article's title and content. Only its author may do this.
///
/// `updated_at` moves strictly forward; concurrent edits are last-write-wins.
pub async fn edit<S>(
    store: &S,
    principal: Option<&Principal>,
    article_id: DbId,
    title: &str,
    content_rich: &str,
) -> AppResult<Article>
where
    S: ArticleStore + ?Sized,
{
    let Some(principal) = principal else {
        return Err(AppError::Core(CoreError::Unauthenticated(
            "Login required to edit articles".into(),
        )));
    };

    let article = store
        .find_article(article_id)
        .await?
        .ok_or_else(|| not_found(article_id))?;

    if !access::can_edit_article(Some(principal), &article) {
        tracing::warn!(
            article_id,
            author_id = principal.author_id,
            owner_id = article.author_id,
            "Edit by non-owner refused",
        );
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the article's author may edit it".into(),
        )));
    }

    let content = prepare(title, content_rich)?;
    let input = UpdateArticle {
        title: content.title,
        content_rich: content.content_rich,
        content_html: content.content_html,
        content_plain: content.content_plain,
        updated_at: types::next_after(article.updated_at),
    };
    let updated = store
        .update_article(article_id, &input)
        .await?
        .ok_or_else(|| not_found(article_id))?;

    tracing::info!(article_id, author_id = principal.author_id, "Article edited");
    Ok(updated)
}

/// Title and rich content for the editor. Open to any authenticated author.
pub async fn fetch_for_edit<S>(
    store: &S,
    principal: Option<&Principal>,
    article_id: DbId,
) -> AppResult<ArticleDraft>
where
    S: ArticleStore + ?Sized,
{
    if !access::can_fetch_for_edit(principal) {
        return Err(AppError::Core(CoreError::Unauthenticated(
            "Login required to edit articles".into(),
        )));
    }

    let article = store
        .find_article(article_id)
        .await?
        .ok_or_else(|| not_found(article_id))?;

    Ok(ArticleDraft {
        title: article.title,
        content_rich: article.content_rich,
    })
}

/// Public view of one article, including its author's name.
pub async fn fetch_for_display<S>(
    store: &S,
    principal: Option<&Principal>,
    article_id: DbId,
) -> AppResult<ArticleView>
where
    S: ArticleStore + ?Sized,
{
    if !access::can_read_article(principal) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Reading this article is not permitted".into(),
        )));
    }

    store
        .find_article_view(article_id)
        .await?
        .ok_or_else(|| not_found(article_id))
}

/// All articles, newest first.
pub async fn list<S>(store: &S) -> AppResult<Vec<ArticleView>>
where
    S: ArticleStore + ?Sized,
{
    Ok(store.list_articles().await?)
}

/// One author's articles, newest first. Unknown authors are `NotFound`.
pub async fn list_by_author<S>(store: &S, author_id: DbId) -> AppResult<Vec<ArticleView>>
where
    S: AuthorStore + ArticleStore + ?Sized,
{
    if store.find_author_by_id(author_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Author",
            id: author_id,
        }));
    }
    Ok(store.list_articles_by_author(author_id).await?)
}

/// Case-insensitive substring search over title and plain text, newest first.
pub async fn search<S>(store: &S, term: &str) -> AppResult<Vec<ArticleView>>
where
    S: ArticleStore + ?Sized,
{
    let term = validate_search_term(term)?;
    Ok(store.search_articles(term).await?)
}
