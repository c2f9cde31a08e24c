//! # Activity feed
//!
//! The heavy lifting is one grouped aggregate in the store; this service
//! owns the feed's row cap and hands the read model to the page layer.

use std::sync::Arc;

use tracing::debug;

use domains::{Result, ThreadActivity, ThreadRepo};

/// Row cap the activity page requests.
pub const DEFAULT_ACTIVITY_LIMIT: i64 = 40;

pub struct ActivityFeed {
    threads: Arc<dyn ThreadRepo>,
}

impl ActivityFeed {
    pub fn new(threads: Arc<dyn ThreadRepo>) -> Self {
        Self { threads }
    }

    /// Up to `limit` threads across all forums, most recently active
    /// first. A thread with no replies counts its own creation as the
    /// latest activity.
    pub async fn recent(&self, limit: i64) -> Result<Vec<ThreadActivity>> {
        let rows = self.threads.recent_activity(limit).await?;
        debug!("Activity feed holds {} rows", rows.len());
        Ok(rows)
    }
}
