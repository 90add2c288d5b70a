use std::sync::Arc;

use lovelock_core::golden::ReservedIds;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and everything else is
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: lovelock_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Golden numbers, loaded once at startup and never mutated.
    pub reserved: Arc<ReservedIds>,
}
