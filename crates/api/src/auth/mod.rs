//! Authentication and authorization primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation, validation, and refresh-token helpers.
//! - [`principal`] -- the verified identity attached to a request.
//! - [`access`] -- stateless permission predicates over a principal.
//! - [`verifier`] -- turns a name and password into a [`principal::Principal`].

pub mod access;
pub mod jwt;
pub mod password;
pub mod principal;
pub mod verifier;
