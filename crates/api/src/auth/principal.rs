//! The verified identity attached to an authenticated request.

use std::collections::BTreeSet;

use inkpost_core::roles::Role;
use inkpost_core::types::DbId;
use inkpost_db::models::author::Author;

/// An authenticated author and the roles granted at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub author_id: DbId,
    pub name: String,
    roles: BTreeSet<Role>,
}

impl Principal {
    pub fn new(author_id: DbId, name: String, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            author_id,
            name,
            roles: roles.into_iter().collect(),
        }
    }

    /// Principal for a stored author: `{author}`, plus `{admin}` if flagged.
    pub fn for_author(author: &Author) -> Self {
        Self::new(author.id, author.name.clone(), author.roles())
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().copied()
    }
}
