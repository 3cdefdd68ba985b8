use std::sync::Arc;

use rollcall_db::DataService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: both fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Persistence handle, built once at startup.
    pub data: Arc<dyn DataService>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(data: Arc<dyn DataService>, config: ServerConfig) -> Self {
        Self {
            data,
            config: Arc::new(config),
        }
    }
}
