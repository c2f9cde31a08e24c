//! Server-rendered page handlers.
//!
//! Every handler follows the same shape: pull what it needs from
//! [`AppState`], call a service, map entities into view models, render.
//! Mutations answer with a redirect so a refresh never replays the POST.

use askama::Template;
use axum::{
    extract::{Form, Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use services::DEFAULT_ACTIVITY_LIMIT;

use crate::error::AppError;
use crate::state::AppState;
use crate::templates::{
    activity_row, forum_row, pager, reply_row, search_hit_view, thread_row, thread_view, user_row,
    ActivityTemplate, ForumTemplate, IndexTemplate, SearchTemplate, ThreadTemplate, UsersTemplate,
};

const OPENMETRICS_CONTENT_TYPE: &str = "application/openmetrics-text; version=1.0.0; charset=utf-8";

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ForumForm {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ThreadForm {
    pub title: String,
    pub author: Option<String>,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ReplyForm {
    pub author: Option<String>,
    pub content: String,
}

/// Reply deletes carry their thread so the redirect can land back on it.
#[derive(Debug, Deserialize)]
pub struct DeleteReplyForm {
    pub thread_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UserForm {
    pub email: String,
    pub username: String,
}

/// Forum index page.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let forums = state.forums.list().await?;
    let template = IndexTemplate {
        forums: forums.iter().map(forum_row).collect(),
    };
    state.metrics.record_page("index");
    Ok(Html(template.render()?))
}

pub async fn create_forum(
    State(state): State<AppState>,
    Form(form): Form<ForumForm>,
) -> Result<Redirect, AppError> {
    state
        .forums
        .create(&form.name, form.slug.as_deref(), form.description.as_deref())
        .await?;
    state.metrics.record_write("forum", "create");
    Ok(Redirect::to("/"))
}

pub async fn delete_forum(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    state.forums.delete(id).await?;
    state.metrics.record_write("forum", "delete");
    Ok(Redirect::to("/"))
}

/// Forum page: one page of its threads, newest first.
///
/// A request past the last page redirects there instead of rendering an
/// empty listing. The thread page below does not do this; that asymmetry
/// is intentional and covered by tests.
pub async fn forum_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let forum = state.forums.get(id).await?;
    let (threads, bounds) = state
        .threads
        .page_for_forum(id, query.page.unwrap_or(1), state.pages.threads_per_page)
        .await?;

    if bounds.past_end() {
        let target = format!("/forums/{}?page={}", id, bounds.total_pages);
        return Ok(Redirect::to(&target).into_response());
    }

    let template = ForumTemplate {
        forum: forum_row(&forum),
        threads: threads.iter().map(thread_row).collect(),
        pager: pager(&bounds),
    };
    state.metrics.record_page("forum");
    Ok(Html(template.render()?).into_response())
}

pub async fn create_thread(
    State(state): State<AppState>,
    Path(forum_id): Path<i64>,
    Form(form): Form<ThreadForm>,
) -> Result<Redirect, AppError> {
    let thread = state
        .threads
        .create(forum_id, &form.title, form.author.as_deref(), &form.content)
        .await?;
    state.metrics.record_write("thread", "create");
    Ok(Redirect::to(&format!("/threads/{}", thread.id)))
}

/// Thread page: the opening post plus one page of replies, oldest first.
/// Past-end pages render empty rather than redirecting.
pub async fn thread_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let thread = state.threads.get(id).await?;
    let (replies, bounds) = state
        .replies
        .page_for_thread(id, query.page.unwrap_or(1), state.pages.replies_per_page)
        .await?;

    let template = ThreadTemplate {
        thread: thread_view(&thread),
        replies: replies.iter().map(reply_row).collect(),
        pager: pager(&bounds),
    };
    state.metrics.record_page("thread");
    Ok(Html(template.render()?))
}

pub async fn create_reply(
    State(state): State<AppState>,
    Path(thread_id): Path<i64>,
    Form(form): Form<ReplyForm>,
) -> Result<Redirect, AppError> {
    state
        .replies
        .create(thread_id, form.author.as_deref(), &form.content)
        .await?;
    state.metrics.record_write("reply", "create");
    Ok(Redirect::to(&format!("/threads/{}", thread_id)))
}

pub async fn delete_thread(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    // Resolve the parent forum before the row disappears.
    let thread = state.threads.get(id).await?;
    state.threads.delete(id).await?;
    state.metrics.record_write("thread", "delete");
    Ok(Redirect::to(&format!("/forums/{}", thread.forum_id)))
}

pub async fn delete_reply(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<DeleteReplyForm>,
) -> Result<Redirect, AppError> {
    state.replies.delete(id).await?;
    state.metrics.record_write("reply", "delete");
    Ok(Redirect::to(&format!("/threads/{}", form.thread_id)))
}

/// Unified search across threads and replies.
pub async fn search_page(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>, AppError> {
    let q = query.q.unwrap_or_default();
    let hits = state.search.search(&q).await?;

    let template = SearchTemplate {
        query: q.trim().to_string(),
        hits: hits.iter().map(search_hit_view).collect(),
    };
    state.metrics.record_page("search");
    Ok(Html(template.render()?))
}

/// Site-wide recent activity feed.
pub async fn activity_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let rows = state.activity.recent(DEFAULT_ACTIVITY_LIMIT).await?;
    let template = ActivityTemplate {
        rows: rows.iter().map(activity_row).collect(),
    };
    state.metrics.record_page("activity");
    Ok(Html(template.render()?))
}

pub async fn users_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let users = state.users.list().await?;
    let template = UsersTemplate {
        users: users.iter().map(user_row).collect(),
    };
    state.metrics.record_page("users");
    Ok(Html(template.render()?))
}

pub async fn create_user(
    State(state): State<AppState>,
    Form(form): Form<UserForm>,
) -> Result<Redirect, AppError> {
    state.users.create(&form.email, &form.username).await?;
    state.metrics.record_write("user", "create");
    Ok(Redirect::to("/users"))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    state.users.delete(id).await?;
    state.metrics.record_write("user", "delete");
    Ok(Redirect::to("/users"))
}

/// OpenMetrics text exposition of the process counters.
pub async fn metrics_endpoint(State(state): State<AppState>) -> Result<Response, AppError> {
    let body = state.metrics.encode()?;
    Ok(([(header::CONTENT_TYPE, OPENMETRICS_CONTENT_TYPE)], body).into_response())
}
