//! Pre-persistence validation rules for articles, authors and search input.
//!
//! Each validator returns the normalized (trimmed) value on success so callers
//! persist exactly what was checked.

use crate::error::CoreError;

/// Minimum length of an author's login name, after trimming.
pub const MIN_AUTHOR_NAME_LEN: usize = 3;

/// Minimum length of a new author's password, after trimming.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validate an article title (non-empty after trimming).
pub fn validate_title(title: &str) -> Result<&str, CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    Ok(title)
}

/// Validate a new author's login name.
pub fn validate_author_name(name: &str) -> Result<&str, CoreError> {
    let name = name.trim();
    if name.chars().count() < MIN_AUTHOR_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Name must be at least {MIN_AUTHOR_NAME_LEN} characters long"
        )));
    }
    Ok(name)
}

/// Validate a new password and its confirmation.
///
/// Checks run in a fixed order: minimum length, then equal length, then equal
/// content. Returns the trimmed password that is to be hashed.
pub fn validate_new_password<'a>(password: &'a str, confirmation: &str) -> Result<&'a str, CoreError> {
    let password = password.trim();
    let confirmation = confirmation.trim();

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    if password.chars().count() != confirmation.chars().count() {
        return Err(CoreError::Validation(
            "Passwords differ in length".into(),
        ));
    }
    if password != confirmation {
        return Err(CoreError::Validation("Passwords do not match".into()));
    }
    Ok(password)
}

/// Validate a search term (non-blank) and return it trimmed.
pub fn validate_search_term(term: &str) -> Result<&str, CoreError> {
    let term = term.trim();
    if term.is_empty() {
        return Err(CoreError::Validation(
            "Search term must not be empty".into(),
        ));
    }
    Ok(term)
}
