//! Application state for the API server

use crate::{CatalogClient, Config};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request (cheap Arc clones).
#[derive(Clone)]
pub struct AppState {
    /// Catalog client (owns the shared content cache)
    pub client: Arc<CatalogClient>,

    /// Configuration (default slug and language)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(client: Arc<CatalogClient>, config: Arc<Config>) -> Self {
        Self { client, config }
    }
}
