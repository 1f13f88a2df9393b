//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::config::AuthMode;
use crate::jira::IssueTracker;
use crate::query::QueryExecutor;
use std::sync::Arc;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Issue tracker used by the pass-through endpoints
    pub tracker: Arc<dyn IssueTracker>,
    /// Query executor for `/query`
    pub executor: Arc<QueryExecutor>,
    /// Inbound authentication mode
    pub auth: Arc<AuthMode>,
}

impl AppState {
    /// Create state around a tracker; the executor shares the same tracker
    pub fn new(tracker: Arc<dyn IssueTracker>, auth: AuthMode) -> Self {
        Self {
            executor: Arc::new(QueryExecutor::new(Arc::clone(&tracker))),
            tracker,
            auth: Arc::new(auth),
        }
    }
}
