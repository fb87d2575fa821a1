//! Stateless permission predicates.
//!
//! Each takes the request's principal, `None` when anonymous, and answers
//! whether the action is allowed. Callers choose the failure kind.

use inkpost_core::roles::Role;
use inkpost_db::models::article::Article;

use super::principal::Principal;

/// Any authenticated author may create articles.
pub fn can_create_article(principal: Option<&Principal>) -> bool {
    principal.is_some()
}

/// Only the owning author may edit an article.
pub fn can_edit_article(principal: Option<&Principal>, article: &Article) -> bool {
    principal.is_some_and(|p| p.author_id == article.author_id)
}

/// Any authenticated author may open an article in the editor.
pub fn can_fetch_for_edit(principal: Option<&Principal>) -> bool {
    principal.is_some()
}

/// Reading is public.
pub fn can_read_article(_principal: Option<&Principal>) -> bool {
    true
}

/// Only admins may create new authors.
pub fn can_provision_author(principal: Option<&Principal>) -> bool {
    principal.is_some_and(|p| p.has_role(Role::Admin))
}
