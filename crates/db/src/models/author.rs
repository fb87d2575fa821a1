//! Author entity model and DTOs.

use inkpost_core::roles::Role;
use inkpost_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full author row from the `authors` table.
///
/// Contains the password hash. Never serialize this to API responses
/// directly; use [`AuthorResponse`] instead.
#[derive(Debug, Clone, FromRow)]
pub struct Author {
    pub id: DbId,
    pub name: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
}

impl Author {
    /// Roles granted to this author at login.
    pub fn roles(&self) -> Vec<Role> {
        Role::for_author(self.is_admin)
    }
}

/// Safe author representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct AuthorResponse {
    pub id: DbId,
    pub name: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
}

impl From<&Author> for AuthorResponse {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            name: author.name.clone(),
            is_admin: author.is_admin,
            created_at: author.created_at,
        }
    }
}

/// Input for inserting a new author. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateAuthor {
    pub name: String,
    pub password_hash: String,
    pub is_admin: bool,
}
