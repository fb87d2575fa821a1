//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated author from a JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- Same, but anonymous requests pass through as `None`.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.

pub mod auth;
pub mod rbac;
