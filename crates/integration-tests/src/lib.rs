//! agora/crates/integration-tests/src/lib.rs
//!
//! Shared fixtures for the cross-crate tests: a full service stack over a
//! fresh in-memory store, plus seeding shortcuts. Everything goes through
//! the real services, so seeded content is validated and sanitized the
//! same way user input is.

use std::sync::Arc;

use domains::{Forum, Reply, Thread};
use services::{
    ActivityFeed, ForumService, HtmlSanitizer, ReplyService, SearchService, ThreadService,
    UserService,
};
use storage_adapters::SqliteStore;

pub struct TestStack {
    pub store: Arc<SqliteStore>,
    pub forums: Arc<ForumService>,
    pub threads: Arc<ThreadService>,
    pub replies: Arc<ReplyService>,
    pub users: Arc<UserService>,
    pub search: Arc<SearchService>,
    pub activity: Arc<ActivityFeed>,
}

impl TestStack {
    pub async fn new() -> Self {
        let store = Arc::new(
            SqliteStore::in_memory()
                .await
                .expect("in-memory store should open"),
        );
        let sanitizer = Arc::new(HtmlSanitizer::default_policy());

        Self {
            forums: Arc::new(ForumService::new(store.clone())),
            threads: Arc::new(ThreadService::new(
                store.clone(),
                store.clone(),
                sanitizer.clone(),
            )),
            replies: Arc::new(ReplyService::new(store.clone(), store.clone(), sanitizer)),
            users: Arc::new(UserService::new(store.clone())),
            search: Arc::new(SearchService::new(store.clone(), store.clone())),
            activity: Arc::new(ActivityFeed::new(store.clone())),
            store,
        }
    }

    pub async fn seed_forum(&self, name: &str) -> Forum {
        self.forums
            .create(name, None, None)
            .await
            .expect("seeding a forum")
    }

    pub async fn seed_thread(&self, forum_id: i64, title: &str, content: &str) -> Thread {
        self.threads
            .create(forum_id, title, None, content)
            .await
            .expect("seeding a thread")
    }

    pub async fn seed_reply(&self, thread_id: i64, author: Option<&str>, content: &str) -> Reply {
        self.replies
            .create(thread_id, author, content)
            .await
            .expect("seeding a reply")
    }
}

#[cfg(feature = "web-axum")]
pub mod web {
    //! Router fixture over a [`TestStack`](super::TestStack), for tests
    //! that drive whole pages instead of individual services.

    use std::sync::Arc;

    use api_adapters::metrics::AppMetrics;
    use api_adapters::{router, AppState, PageSettings};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
        Router,
    };
    use tower::ServiceExt;

    use super::TestStack;

    impl TestStack {
        /// The full page router over this stack's services.
        pub fn app(&self, pages: PageSettings) -> Router {
            let state = AppState {
                forums: self.forums.clone(),
                threads: self.threads.clone(),
                replies: self.replies.clone(),
                users: self.users.clone(),
                search: self.search.clone(),
                activity: self.activity.clone(),
                pages,
                metrics: Arc::new(AppMetrics::new()),
            };
            router(state)
        }
    }

    pub async fn get(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn page_text(app: &Router, uri: &str) -> String {
        let response = get(app, uri).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    pub fn location(response: &Response) -> String {
        response
            .headers()
            .get(header::LOCATION)
            .expect("redirect without a location header")
            .to_str()
            .unwrap()
            .to_string()
    }
}
