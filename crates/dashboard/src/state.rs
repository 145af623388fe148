//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::page::PageHandle;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    page: PageHandle,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: DashboardConfig, page: PageHandle) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, page }),
        }
    }

    /// Get a reference to the dashboard configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Get a reference to the variants page handle.
    #[must_use]
    pub fn page(&self) -> &PageHandle {
        &self.inner.page
    }
}
