//! # Domain Models
//!
//! These structs represent the core entities of the forum: forums own
//! threads, threads own replies, and users exist independently of both.
//! Integer ids are assigned by the store; user ids are UUID v4.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account. Not linked to authored content; the `author`
/// fields on threads and replies are free-form display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Unique contact address.
    pub email: String,
    /// Unique display handle.
    pub username: String,
    pub created_at: DateTime<Utc>,
    /// Set equal to `created_at` on insert; there is no update path.
    pub updated_at: DateTime<Utc>,
}

/// A top-level category containing threads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forum {
    pub id: i64,
    pub name: String,
    /// Optional unique URL fragment (e.g., "general").
    pub slug: Option<String>,
    pub description: Option<String>,
}

/// A topic-starting post within a forum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    pub id: i64,
    pub forum_id: i64,
    pub title: String,
    /// Display name of the poster; anonymous when absent.
    pub author: Option<String>,
    /// Sanitized HTML, safe to render unescaped.
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A response attached to a thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub id: i64,
    pub thread_id: i64,
    pub author: Option<String>,
    /// Sanitized HTML, safe to render unescaped.
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Field set for inserting a [`User`]; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
}

/// Field set for inserting a [`Forum`].
#[derive(Debug, Clone)]
pub struct NewForum {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
}

/// Field set for inserting a [`Thread`]. `content` must already be
/// sanitized by the time it reaches a repository.
#[derive(Debug, Clone)]
pub struct NewThread {
    pub forum_id: i64,
    pub title: String,
    pub author: Option<String>,
    pub content: String,
}

/// Field set for inserting a [`Reply`].
#[derive(Debug, Clone)]
pub struct NewReply {
    pub thread_id: i64,
    pub author: Option<String>,
    pub content: String,
}

/// One row of the cross-forum activity feed: a thread, its forum's name,
/// how many replies it has, and when something last happened in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadActivity {
    pub thread: Thread,
    pub forum_name: String,
    pub reply_count: i64,
    /// Creation time of the newest reply; `None` when the thread has none.
    pub last_reply_at: Option<DateTime<Utc>>,
    /// The later of the newest reply time and the thread's own creation time.
    pub latest_activity: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_of_quiet_thread_falls_back_to_creation_time() {
        let created = Utc::now();
        let row = ThreadActivity {
            thread: Thread {
                id: 1,
                forum_id: 1,
                title: "hello".into(),
                author: None,
                content: "<p>hi</p>".into(),
                created_at: created,
            },
            forum_name: "general".into(),
            reply_count: 0,
            last_reply_at: None,
            latest_activity: created,
        };
        assert_eq!(row.reply_count, 0);
        assert_eq!(row.latest_activity, row.thread.created_at);
    }
}
