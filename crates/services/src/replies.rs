//! # Reply service
//!
//! Replies are created under an existing thread only, with sanitized
//! content. Deletion is a filtered delete: removing an id that is already
//! gone is a no-op, unlike thread deletion which reports not-found.

use std::sync::Arc;

use tracing::{debug, info};

use domains::{DomainError, NewReply, Reply, ReplyRepo, Result, Sanitizer, ThreadRepo};

use crate::pagination::{page_bounds, PageBounds};
use crate::util::non_blank;

pub struct ReplyService {
    threads: Arc<dyn ThreadRepo>,
    replies: Arc<dyn ReplyRepo>,
    sanitizer: Arc<dyn Sanitizer>,
}

impl ReplyService {
    pub fn new(
        threads: Arc<dyn ThreadRepo>,
        replies: Arc<dyn ReplyRepo>,
        sanitizer: Arc<dyn Sanitizer>,
    ) -> Self {
        Self {
            threads,
            replies,
            sanitizer,
        }
    }

    pub async fn create(
        &self,
        thread_id: i64,
        author: Option<&str>,
        content: &str,
    ) -> Result<Reply> {
        if content.trim().is_empty() {
            return Err(DomainError::Validation(
                "reply content must not be empty".to_string(),
            ));
        }

        if self.threads.find_by_id(thread_id).await?.is_none() {
            return Err(DomainError::not_found("thread", thread_id));
        }

        let reply = self
            .replies
            .create(NewReply {
                thread_id,
                author: non_blank(author),
                content: self.sanitizer.clean(content),
            })
            .await?;
        info!("Created reply #{} in thread #{}", reply.id, thread_id);
        Ok(reply)
    }

    /// One page of a thread's replies, oldest first, plus the resolved
    /// window. Past-end pages fetch an empty slice; this listing never
    /// redirects, so the caller renders what it gets.
    pub async fn page_for_thread(
        &self,
        thread_id: i64,
        requested_page: i64,
        per_page: i64,
    ) -> Result<(Vec<Reply>, PageBounds)> {
        let total = self.replies.count_for_thread(thread_id).await?;
        let bounds = page_bounds(requested_page, total, per_page);
        let replies = self
            .replies
            .page_for_thread(thread_id, bounds.limit, bounds.offset)
            .await?;
        Ok((replies, bounds))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let affected = self.replies.delete(id).await?;
        if affected == 0 {
            debug!("Delete of reply #{} removed nothing", id);
        } else {
            info!("Deleted reply #{}", id);
        }
        Ok(())
    }
}
