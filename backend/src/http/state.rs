//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::PagingSettings;
use crate::db::repository::BeerRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for catalog storage
    pub repository: Arc<dyn BeerRepository>,
    /// Page size defaults and limits for the list endpoint
    pub paging: PagingSettings,
}

impl AppState {
    /// Create a new application state with the given repository and default paging.
    pub fn new(repository: Arc<dyn BeerRepository>) -> Self {
        Self {
            repository,
            paging: PagingSettings::default(),
        }
    }

    pub fn with_paging(mut self, paging: PagingSettings) -> Self {
        self.paging = paging;
        self
    }
}
