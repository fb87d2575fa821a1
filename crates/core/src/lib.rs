//! Domain rules for the inkpost blogging backend.
//!
//! Everything here is free of I/O so it can be shared by the persistence and
//! HTTP layers and tested in isolation.

pub mod delta;
pub mod error;
pub mod roles;
pub mod sanitize;
pub mod types;
pub mod validation;
