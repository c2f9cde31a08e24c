//! # Search aggregator
//!
//! One query string fans out into two capped store queries (threads and
//! replies), and the rows are folded into per-thread hits. A thread shows
//! up either because its own text matched or because at least one of its
//! replies did; the latter are the "orphan" hits appended after the
//! direct matches.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use domains::{Reply, ReplyRepo, Result, Thread, ThreadRepo};

/// Row cap applied to the thread query and the reply query independently.
/// The two caps are not coordinated: a reply can surface a thread ranked
/// far below the top twenty thread matches.
pub const SEARCH_LIMIT: i64 = 20;

/// One grouped search result.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub thread: Thread,
    /// True when the thread's own title, content, or author matched.
    pub matched_thread: bool,
    /// Matching replies of this thread, oldest first. Never empty when
    /// `matched_thread` is false.
    pub reply_matches: Vec<Reply>,
}

pub struct SearchService {
    threads: Arc<dyn ThreadRepo>,
    replies: Arc<dyn ReplyRepo>,
}

impl SearchService {
    pub fn new(threads: Arc<dyn ThreadRepo>, replies: Arc<dyn ReplyRepo>) -> Self {
        Self { threads, replies }
    }

    /// Runs the two capped queries and groups the results, most recent
    /// matching thread first, then reply-only threads in the order their
    /// ids were first seen in the reply rows.
    pub async fn search(&self, q: &str) -> Result<Vec<SearchHit>> {
        let term = q.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let thread_matches = self.threads.search(term, SEARCH_LIMIT).await?;
        let reply_matches = self.replies.search(term, SEARCH_LIMIT).await?;

        // Group replies by owning thread, remembering the order in which
        // thread ids first appeared in the reply rows.
        let mut groups: HashMap<i64, Vec<Reply>> = HashMap::new();
        let mut discovered: Vec<i64> = Vec::new();
        for reply in reply_matches {
            match groups.entry(reply.thread_id) {
                Entry::Vacant(slot) => {
                    discovered.push(reply.thread_id);
                    slot.insert(vec![reply]);
                }
                Entry::Occupied(mut slot) => slot.get_mut().push(reply),
            }
        }

        let mut hits = Vec::with_capacity(thread_matches.len() + discovered.len());
        for thread in thread_matches {
            let reply_group = groups.remove(&thread.id).unwrap_or_default();
            hits.push(SearchHit {
                matched_thread: true,
                reply_matches: oldest_first(reply_group),
                thread,
            });
        }

        // Whatever is left in the map matched only through a reply. Fetch
        // those threads in one batch and append them in discovery order.
        let orphan_ids: Vec<i64> = discovered
            .into_iter()
            .filter(|id| groups.contains_key(id))
            .collect();
        if !orphan_ids.is_empty() {
            let mut orphan_threads: HashMap<i64, Thread> = self
                .threads
                .find_by_ids(&orphan_ids)
                .await?
                .into_iter()
                .map(|thread| (thread.id, thread))
                .collect();
            for id in orphan_ids {
                // A thread deleted between the two queries simply drops out.
                if let Some(thread) = orphan_threads.remove(&id) {
                    let reply_group = groups.remove(&id).unwrap_or_default();
                    hits.push(SearchHit {
                        matched_thread: false,
                        reply_matches: oldest_first(reply_group),
                        thread,
                    });
                }
            }
        }

        debug!("Search for '{}' produced {} hits", term, hits.len());
        Ok(hits)
    }
}

fn oldest_first(mut replies: Vec<Reply>) -> Vec<Reply> {
    replies.sort_by_key(|reply| (reply.created_at, reply.id));
    replies
}
