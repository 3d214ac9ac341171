use std::sync::Arc;

use crate::config::Config;
use crate::contacts::store::ContactStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL in production, in-memory for `serve --snapshot` and tests.
    pub store: Arc<dyn ContactStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn ContactStore>, config: Config) -> Self {
        Self { store, config }
    }
}
