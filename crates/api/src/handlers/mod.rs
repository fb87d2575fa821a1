//! Request handlers.
//!
//! Handlers extract the caller and payload, delegate to [`crate::services`]
//! (or the store directly for plain reads) and wrap results in
//! [`crate::response::DataResponse`].

pub mod admin;
pub mod articles;
pub mod auth;
