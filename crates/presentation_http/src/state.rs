//! Application state shared across handlers

use std::sync::Arc;

use application::DocumentService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Document use cases
    pub documents: Arc<DocumentService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
