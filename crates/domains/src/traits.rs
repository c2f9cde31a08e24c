//! # Core Traits (Ports)
//!
//! Any storage or policy adapter must implement these traits to be wired
//! into the binary. With the `testing` feature enabled, mockall generates a
//! `MockXxx` companion for every port so services can be tested in
//! isolation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Forum, NewForum, NewReply, NewThread, NewUser, Reply, Thread, ThreadActivity, User,
};

/// Persistence contract for forums.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ForumRepo: Send + Sync {
    async fn create(&self, forum: NewForum) -> Result<Forum>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Forum>>;
    async fn list(&self) -> Result<Vec<Forum>>;
    /// Removes the forum and, through the store, everything it owns.
    /// Returns the number of forum rows affected (zero for a missing id).
    async fn delete(&self, id: i64) -> Result<u64>;
}

/// Persistence contract for threads, including the listing, search, and
/// aggregation queries the page handlers are built on.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ThreadRepo: Send + Sync {
    async fn create(&self, thread: NewThread) -> Result<Thread>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Thread>>;
    /// Batch lookup used when a search matched a reply but not its thread.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Thread>>;
    /// One listing page for a forum, newest thread first.
    async fn page_for_forum(&self, forum_id: i64, limit: i64, offset: i64) -> Result<Vec<Thread>>;
    async fn count_for_forum(&self, forum_id: i64) -> Result<i64>;
    /// Threads whose title, content, or author contains `term`,
    /// case-insensitively, newest first, capped at `limit`.
    async fn search(&self, term: &str, limit: i64) -> Result<Vec<Thread>>;
    /// Per-thread reply counts and latest-activity timestamps across all
    /// forums, most recently active first, capped at `limit`.
    async fn recent_activity(&self, limit: i64) -> Result<Vec<ThreadActivity>>;
    /// Deletes the thread and its replies in one transaction; both
    /// statements commit or neither does.
    async fn delete_with_replies(&self, id: i64) -> Result<()>;
}

/// Persistence contract for replies.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ReplyRepo: Send + Sync {
    async fn create(&self, reply: NewReply) -> Result<Reply>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Reply>>;
    /// One listing page for a thread, oldest reply first.
    async fn page_for_thread(&self, thread_id: i64, limit: i64, offset: i64) -> Result<Vec<Reply>>;
    async fn count_for_thread(&self, thread_id: i64) -> Result<i64>;
    /// Replies whose content or author contains `term`, case-insensitively,
    /// newest first, capped at `limit`.
    async fn search(&self, term: &str, limit: i64) -> Result<Vec<Reply>>;
    /// Returns the number of rows removed; a missing id removes zero rows
    /// and is not an error.
    async fn delete(&self, id: i64) -> Result<u64>;
}

/// Persistence contract for user accounts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn list(&self) -> Result<Vec<User>>;
    async fn delete(&self, id: Uuid) -> Result<u64>;
}

/// Markup policy applied to user-submitted text before it is persisted.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Sanitizer: Send + Sync {
    /// Returns `raw` with all markup outside the configured allowlist
    /// neutralized. The result is safe to render without further escaping.
    fn clean(&self, raw: &str) -> String;
}
