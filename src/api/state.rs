//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::QueryServiceTrait;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub query_service: Arc<dyn QueryServiceTrait>,
}

impl AppState {
    pub fn new(query_service: Arc<dyn QueryServiceTrait>) -> Self {
        Self { query_service }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("query_service", &self.query_service)
            .finish()
    }
}
