//! Application state for the API server

use crate::config::Config;
use crate::db::Database;
use crate::executor::RunExecutor;
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned per request (cheap Arc clones).
#[derive(Clone)]
pub struct AppState {
    /// Storage for runs and seller entries
    pub db: Arc<Database>,

    /// Executor used by the manual-trigger endpoints
    pub executor: Arc<RunExecutor>,

    /// Configuration (read access)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(db: Arc<Database>, executor: Arc<RunExecutor>, config: Arc<Config>) -> Self {
        Self {
            db,
            executor,
            config,
        }
    }
}
