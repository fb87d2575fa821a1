//! Authentication verifier: name + password to [`Principal`].

use std::sync::Arc;

use inkpost_db::store::AuthorStore;

use super::password::PasswordHasher;
use super::principal::Principal;
use crate::error::{AppResult, AuthFailure};

/// Verify a login attempt.
///
/// Unknown names still pay for one hash verification against a decoy, and
/// both failure kinds are logged and reported identically.
pub async fn authenticate<S>(
    store: &S,
    hasher: &Arc<PasswordHasher>,
    name: &str,
    password: &str,
) -> AppResult<Principal>
where
    S: AuthorStore + ?Sized,
{
    let author = store.find_author_by_name(name).await?;

    let verified = hasher
        .verify_blocking(
            password.to_string(),
            author.as_ref().map(|a| a.password_hash.clone()),
        )
        .await?;

    match author {
        Some(author) if verified => Ok(Principal::for_author(&author)),
        Some(_) => {
            tracing::warn!("Login rejected");
            Err(AuthFailure::InvalidCredential.into())
        }
        None => {
            tracing::warn!("Login rejected");
            Err(AuthFailure::UnknownPrincipal.into())
        }
    }
}
