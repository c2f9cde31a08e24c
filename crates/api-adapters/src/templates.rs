//! Askama templates and their view models.
//!
//! Handlers never hand entities to a template directly: every page gets a
//! flat, display-ready struct built by the mapping functions below, so the
//! persisted shapes and the rendered shapes can drift independently.

use askama::Template;
use chrono::{DateTime, Utc};

use domains::{Forum, Reply, Thread, ThreadActivity, User};
use services::{PageBounds, SearchHit};

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn display_author(author: &Option<String>) -> String {
    author.clone().unwrap_or_else(|| "Anonymous".to_string())
}

/// Forum line on the index page.
#[derive(Debug)]
pub struct ForumRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
}

/// Thread line on a forum page.
#[derive(Debug)]
pub struct ThreadRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub created_at_display: String,
}

/// The opening post on a thread page. `content` is sanitized HTML and is
/// rendered with the `safe` filter.
#[derive(Debug)]
pub struct ThreadView {
    pub id: i64,
    pub forum_id: i64,
    pub title: String,
    pub author: String,
    pub content: String,
    pub created_at_display: String,
}

/// One reply, on a thread page or under a search hit.
#[derive(Debug)]
pub struct ReplyRow {
    pub id: i64,
    pub author: String,
    pub content: String,
    pub created_at_display: String,
}

/// One grouped search result.
#[derive(Debug)]
pub struct SearchHitView {
    pub thread_id: i64,
    pub title: String,
    pub matched_thread: bool,
    pub replies: Vec<ReplyRow>,
}

/// One line of the activity feed.
#[derive(Debug)]
pub struct ActivityRow {
    pub thread_id: i64,
    pub title: String,
    pub forum_id: i64,
    pub forum_name: String,
    pub reply_count: i64,
    pub last_reply_display: String,
    pub latest_activity_display: String,
}

/// One line of the user management page.
#[derive(Debug)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub username: String,
    pub created_at_display: String,
}

/// Pagination controls; built from the resolved [`PageBounds`].
#[derive(Debug)]
pub struct Pager {
    pub page: i64,
    pub total_pages: i64,
    pub has_prev: bool,
    pub prev_page: i64,
    pub has_next: bool,
    pub next_page: i64,
}

pub fn forum_row(forum: &Forum) -> ForumRow {
    ForumRow {
        id: forum.id,
        name: forum.name.clone(),
        slug: forum.slug.clone().unwrap_or_default(),
        description: forum.description.clone().unwrap_or_default(),
    }
}

pub fn thread_row(thread: &Thread) -> ThreadRow {
    ThreadRow {
        id: thread.id,
        title: thread.title.clone(),
        author: display_author(&thread.author),
        created_at_display: format_timestamp(thread.created_at),
    }
}

pub fn thread_view(thread: &Thread) -> ThreadView {
    ThreadView {
        id: thread.id,
        forum_id: thread.forum_id,
        title: thread.title.clone(),
        author: display_author(&thread.author),
        content: thread.content.clone(),
        created_at_display: format_timestamp(thread.created_at),
    }
}

pub fn reply_row(reply: &Reply) -> ReplyRow {
    ReplyRow {
        id: reply.id,
        author: display_author(&reply.author),
        content: reply.content.clone(),
        created_at_display: format_timestamp(reply.created_at),
    }
}

pub fn search_hit_view(hit: &SearchHit) -> SearchHitView {
    SearchHitView {
        thread_id: hit.thread.id,
        title: hit.thread.title.clone(),
        matched_thread: hit.matched_thread,
        replies: hit.reply_matches.iter().map(reply_row).collect(),
    }
}

pub fn activity_row(row: &ThreadActivity) -> ActivityRow {
    ActivityRow {
        thread_id: row.thread.id,
        title: row.thread.title.clone(),
        forum_id: row.thread.forum_id,
        forum_name: row.forum_name.clone(),
        reply_count: row.reply_count,
        last_reply_display: row
            .last_reply_at
            .map(format_timestamp)
            .unwrap_or_else(|| "no replies".to_string()),
        latest_activity_display: format_timestamp(row.latest_activity),
    }
}

pub fn user_row(user: &User) -> UserRow {
    UserRow {
        id: user.id.to_string(),
        email: user.email.clone(),
        username: user.username.clone(),
        created_at_display: format_timestamp(user.created_at),
    }
}

pub fn pager(bounds: &PageBounds) -> Pager {
    Pager {
        page: bounds.page,
        total_pages: bounds.total_pages,
        has_prev: bounds.has_prev(),
        prev_page: bounds.page.saturating_sub(1),
        has_next: bounds.has_next(),
        next_page: bounds.page.saturating_add(1),
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub forums: Vec<ForumRow>,
}

#[derive(Template)]
#[template(path = "forum.html")]
pub struct ForumTemplate {
    pub forum: ForumRow,
    pub threads: Vec<ThreadRow>,
    pub pager: Pager,
}

#[derive(Template)]
#[template(path = "thread.html")]
pub struct ThreadTemplate {
    pub thread: ThreadView,
    pub replies: Vec<ReplyRow>,
    pub pager: Pager,
}

#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub query: String,
    pub hits: Vec<SearchHitView>,
}

#[derive(Template)]
#[template(path = "activity.html")]
pub struct ActivityTemplate {
    pub rows: Vec<ActivityRow>,
}

#[derive(Template)]
#[template(path = "users.html")]
pub struct UsersTemplate {
    pub users: Vec<UserRow>,
}
