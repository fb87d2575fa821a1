//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row and plain input structs for inserts and updates.

pub mod article;
pub mod author;
pub mod session;
