use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once in `main` (or per test) and injected into the router; nothing
/// lives in process-wide globals. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: helpdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
