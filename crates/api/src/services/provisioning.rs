//! Author provisioning: admins create new (non-admin) authors.

use std::sync::Arc;

use inkpost_core::error::CoreError;
use inkpost_core::validation::{validate_author_name, validate_new_password};
use inkpost_db::models::author::{Author, CreateAuthor};
use inkpost_db::store::{AuthorStore, UQ_AUTHORS_NAME};

use crate::auth::access;
use crate::auth::password::PasswordHasher;
use crate::auth::principal::Principal;
use crate::error::{AppError, AppResult};

fn name_taken() -> AppError {
    AppError::Core(CoreError::Validation("Name is already taken".into()))
}

/// Create a new author on behalf of an admin.
///
/// Checks run in a fixed order so the reported failure is deterministic:
/// permission, name length, name availability, then the password rules.
/// The trimmed name and trimmed first password are what get stored.
pub async fn provision<S>(
    store: &S,
    hasher: &Arc<PasswordHasher>,
    principal: Option<&Principal>,
    name: &str,
    password1: &str,
    password2: &str,
) -> AppResult<Author>
where
    S: AuthorStore + ?Sized,
{
    if !access::can_provision_author(principal) {
        tracing::warn!(
            author_id = ?principal.map(|p| p.author_id),
            "Author provisioning refused",
        );
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin role required".into(),
        )));
    }

    let name = validate_author_name(name)?;
    if store.find_author_by_name(name).await?.is_some() {
        return Err(name_taken());
    }
    let password = validate_new_password(password1, password2)?;

    let password_hash = hasher.hash_blocking(password.to_string()).await?;
    let input = CreateAuthor {
        name: name.to_string(),
        password_hash,
        is_admin: false,
    };
    // A concurrent provisioning of the same name loses at the constraint.
    let author = store.create_author(&input).await.map_err(|e| {
        if e.is_conflict_on(UQ_AUTHORS_NAME) {
            name_taken()
        } else {
            e.into()
        }
    })?;

    tracing::info!(
        author_id = author.id,
        provisioned_by = ?principal.map(|p| p.author_id),
        "Author provisioned",
    );
    Ok(author)
}
