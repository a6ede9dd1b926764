//! Application state for the HTTP server.

use std::sync::Arc;

use crate::store::DatasetStore;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// In-memory dataset registry
    pub store: Arc<DatasetStore>,
}

impl AppState {
    /// Create a new application state with the given store.
    pub fn new(store: Arc<DatasetStore>) -> Self {
        Self { store }
    }
}
