use std::sync::Arc;

use inkpost_db::store::Store;

use crate::auth::password::PasswordHasher;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Storage backend (PostgreSQL or in-memory).
    pub store: Arc<dyn Store>,
    /// Password hasher with the configured cost.
    pub hasher: Arc<PasswordHasher>,
    pub config: Arc<ServerConfig>,
}
