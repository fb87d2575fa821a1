//! Domain services sitting between handlers and the store.
//!
//! Each operation takes the store port it needs plus the caller's principal
//! (`None` when anonymous) and returns a typed [`crate::error::AppResult`].

pub mod articles;
pub mod provisioning;
