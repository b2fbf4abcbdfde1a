use std::sync::Arc;

use scenestore_core::storage::AssetStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: scenestore_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Upload directory holding originals and derived variants.
    pub assets: AssetStore,
}
