//! Shared handler state. Everything is constructed once at startup and
//! injected; no piece of it is reachable through globals.

use std::sync::Arc;

use services::{
    ActivityFeed, ForumService, ReplyService, SearchService, ThreadService, UserService,
};

use crate::metrics::AppMetrics;

/// Page sizes for the two paginated listings.
#[derive(Debug, Clone, Copy)]
pub struct PageSettings {
    pub threads_per_page: i64,
    pub replies_per_page: i64,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            threads_per_page: 10,
            replies_per_page: 10,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub forums: Arc<ForumService>,
    pub threads: Arc<ThreadService>,
    pub replies: Arc<ReplyService>,
    pub users: Arc<UserService>,
    pub search: Arc<SearchService>,
    pub activity: Arc<ActivityFeed>,
    pub pages: PageSettings,
    pub metrics: Arc<AppMetrics>,
}
