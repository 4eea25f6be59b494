use crate::orchestrator::RouteOrchestrator;
use std::sync::Arc;

/// Shared application state for the HTTP server
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    orchestrator: RouteOrchestrator,
}

impl AppState {
    pub fn new(orchestrator: RouteOrchestrator) -> Self {
        Self {
            inner: Arc::new(AppStateInner { orchestrator }),
        }
    }

    pub fn orchestrator(&self) -> &RouteOrchestrator {
        &self.inner.orchestrator
    }
}
