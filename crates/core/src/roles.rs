//! Well-known roles carried by an authenticated principal.
//!
//! Every author holds [`Role::Author`]; authors flagged as admins additionally
//! hold [`Role::Admin`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ROLE_AUTHOR: &str = "author";
pub const ROLE_ADMIN: &str = "admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Author,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Author => ROLE_AUTHOR,
            Role::Admin => ROLE_ADMIN,
        }
    }

    /// The role set granted to an author record.
    pub fn for_author(is_admin: bool) -> Vec<Role> {
        if is_admin {
            vec![Role::Author, Role::Admin]
        } else {
            vec![Role::Author]
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_AUTHOR => Ok(Role::Author),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(format!("Unknown role '{other}'")),
        }
    }
}
