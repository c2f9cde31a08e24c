//! # Thread service
//!
//! Thread creation runs content through the sanitizer and checks that the
//! parent forum exists before inserting; the schema's foreign keys stay on
//! as a second line. Deletion looks the thread up first so a missing id is
//! reported as not-found rather than silently removing nothing.

use std::sync::Arc;

use tracing::info;

use domains::{DomainError, ForumRepo, NewThread, Result, Sanitizer, Thread, ThreadRepo};

use crate::pagination::{page_bounds, PageBounds};
use crate::util::non_blank;

pub struct ThreadService {
    forums: Arc<dyn ForumRepo>,
    threads: Arc<dyn ThreadRepo>,
    sanitizer: Arc<dyn Sanitizer>,
}

impl ThreadService {
    pub fn new(
        forums: Arc<dyn ForumRepo>,
        threads: Arc<dyn ThreadRepo>,
        sanitizer: Arc<dyn Sanitizer>,
    ) -> Self {
        Self {
            forums,
            threads,
            sanitizer,
        }
    }

    pub async fn create(
        &self,
        forum_id: i64,
        title: &str,
        author: Option<&str>,
        content: &str,
    ) -> Result<Thread> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::Validation(
                "thread title must not be empty".to_string(),
            ));
        }
        if content.trim().is_empty() {
            return Err(DomainError::Validation(
                "thread content must not be empty".to_string(),
            ));
        }

        if self.forums.find_by_id(forum_id).await?.is_none() {
            return Err(DomainError::not_found("forum", forum_id));
        }

        let thread = self
            .threads
            .create(NewThread {
                forum_id,
                title: title.to_string(),
                author: non_blank(author),
                content: self.sanitizer.clean(content),
            })
            .await?;
        info!("Created thread #{} in forum #{}", thread.id, forum_id);
        Ok(thread)
    }

    pub async fn get(&self, id: i64) -> Result<Thread> {
        self.threads
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("thread", id))
    }

    /// One page of a forum's threads, newest first, plus the resolved
    /// window. Always fetches, even past the end; whether to redirect an
    /// out-of-range page is the caller's decision.
    pub async fn page_for_forum(
        &self,
        forum_id: i64,
        requested_page: i64,
        per_page: i64,
    ) -> Result<(Vec<Thread>, PageBounds)> {
        let total = self.threads.count_for_forum(forum_id).await?;
        let bounds = page_bounds(requested_page, total, per_page);
        let threads = self
            .threads
            .page_for_forum(forum_id, bounds.limit, bounds.offset)
            .await?;
        Ok((threads, bounds))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if self.threads.find_by_id(id).await?.is_none() {
            return Err(DomainError::not_found("thread", id));
        }
        self.threads.delete_with_replies(id).await?;
        info!("Deleted thread #{} and its replies", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use domains::{Forum, MockForumRepo, MockSanitizer, MockThreadRepo};
    use mockall::predicate::eq;

    fn some_forum(id: i64) -> Forum {
        Forum {
            id,
            name: "General".to_string(),
            slug: None,
            description: None,
        }
    }

    fn thread(id: i64, forum_id: i64) -> Thread {
        Thread {
            id,
            forum_id,
            title: format!("Thread {id}"),
            author: None,
            content: "body".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn pass_through_sanitizer() -> MockSanitizer {
        let mut sanitizer = MockSanitizer::new();
        sanitizer.expect_clean().returning(|raw| raw.to_string());
        sanitizer
    }

    #[tokio::test]
    async fn create_sanitizes_content_before_insert() {
        let mut forums = MockForumRepo::new();
        forums
            .expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(some_forum(id))));

        let mut sanitizer = MockSanitizer::new();
        sanitizer
            .expect_clean()
            .with(eq("<script>x</script>"))
            .returning(|_| "clean".to_string());

        let mut threads = MockThreadRepo::new();
        threads
            .expect_create()
            .withf(|new| new.content == "clean" && new.author.is_none())
            .returning(|new| {
                Ok(Thread {
                    id: 7,
                    forum_id: new.forum_id,
                    title: new.title,
                    author: new.author,
                    content: new.content,
                    created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
                })
            });

        let service = ThreadService::new(Arc::new(forums), Arc::new(threads), Arc::new(sanitizer));
        let thread = service
            .create(1, "Hello", Some("  "), "<script>x</script>")
            .await
            .unwrap();
        assert_eq!(thread.content, "clean");
    }

    #[tokio::test]
    async fn create_under_missing_forum_is_not_found() {
        let mut forums = MockForumRepo::new();
        forums.expect_find_by_id().with(eq(99)).returning(|_| Ok(None));

        let threads = MockThreadRepo::new();
        let service = ThreadService::new(
            Arc::new(forums),
            Arc::new(threads),
            Arc::new(pass_through_sanitizer()),
        );

        let err = service.create(99, "Hello", None, "body").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn create_rejects_empty_title_and_content() {
        let service = ThreadService::new(
            Arc::new(MockForumRepo::new()),
            Arc::new(MockThreadRepo::new()),
            Arc::new(pass_through_sanitizer()),
        );

        assert!(matches!(
            service.create(1, "  ", None, "body").await.unwrap_err(),
            DomainError::Validation(_)
        ));
        assert!(matches!(
            service.create(1, "Hello", None, "\n ").await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn page_for_forum_reports_past_end_without_clamping() {
        let mut threads = MockThreadRepo::new();
        threads.expect_count_for_forum().with(eq(1)).returning(|_| Ok(25));
        threads
            .expect_page_for_forum()
            .with(eq(1), eq(10), eq(980))
            .returning(|_, _, _| Ok(Vec::new()));

        let service = ThreadService::new(
            Arc::new(MockForumRepo::new()),
            Arc::new(threads),
            Arc::new(pass_through_sanitizer()),
        );

        let (rows, bounds) = service.page_for_forum(1, 99, 10).await.unwrap();
        assert!(rows.is_empty());
        assert_eq!(bounds.page, 99);
        assert_eq!(bounds.total_pages, 3);
        assert!(bounds.past_end());
    }

    #[tokio::test]
    async fn delete_looks_up_before_removing() {
        let mut threads = MockThreadRepo::new();
        threads
            .expect_find_by_id()
            .with(eq(5))
            .returning(|id| Ok(Some(thread(id, 1))));
        threads
            .expect_delete_with_replies()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(()));

        let service = ThreadService::new(
            Arc::new(MockForumRepo::new()),
            Arc::new(threads),
            Arc::new(pass_through_sanitizer()),
        );
        service.delete(5).await.unwrap();
    }

    #[tokio::test]
    async fn delete_of_missing_thread_short_circuits() {
        let mut threads = MockThreadRepo::new();
        threads.expect_find_by_id().with(eq(5)).returning(|_| Ok(None));
        // No expect_delete_with_replies: reaching it would fail the test.

        let service = ThreadService::new(
            Arc::new(MockForumRepo::new()),
            Arc::new(threads),
            Arc::new(pass_through_sanitizer()),
        );
        assert!(service.delete(5).await.unwrap_err().is_not_found());
    }
}
