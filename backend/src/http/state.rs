//! Application state for the HTTP server.

use std::sync::Arc;

use crate::source::DatasetCache;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide dataset, loaded on first use
    pub cache: Arc<DatasetCache>,
}

impl AppState {
    /// Create a new application state around the given cache.
    pub fn new(cache: Arc<DatasetCache>) -> Self {
        Self { cache }
    }
}
