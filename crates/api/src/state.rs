use std::sync::Arc;

use crate::catalog::CatalogService;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Product catalog operations.
    pub catalog: CatalogService,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
