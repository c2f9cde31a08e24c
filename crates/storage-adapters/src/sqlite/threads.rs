use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use domains::{DomainError, NewThread, Result, Thread, ThreadActivity, ThreadRepo};

use super::SqliteStore;

const THREAD_COLUMNS: &str = "id, forum_id, title, author, content, created_at";

fn map_thread(row: &SqliteRow) -> sqlx::Result<Thread> {
    Ok(Thread {
        id: row.try_get("id")?,
        forum_id: row.try_get("forum_id")?,
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
    })
}

fn map_activity(row: &SqliteRow) -> sqlx::Result<ThreadActivity> {
    Ok(ThreadActivity {
        thread: map_thread(row)?,
        forum_name: row.try_get("forum_name")?,
        reply_count: row.try_get("reply_count")?,
        last_reply_at: row.try_get("last_reply_at")?,
        latest_activity: row.try_get("latest_activity")?,
    })
}

#[async_trait]
impl ThreadRepo for SqliteStore {
    async fn create(&self, thread: NewThread) -> Result<Thread> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO threads (forum_id, title, author, content, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(thread.forum_id)
        .bind(&thread.title)
        .bind(&thread.author)
        .bind(&thread.content)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(DomainError::persistence)?;

        Ok(Thread {
            id: result.last_insert_rowid(),
            forum_id: thread.forum_id,
            title: thread.title,
            author: thread.author,
            content: thread.content,
            created_at,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Thread>> {
        let row = sqlx::query(&format!(
            "SELECT {THREAD_COLUMNS} FROM threads WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::persistence)?;

        match row {
            Some(row) => Ok(Some(map_thread(&row).map_err(DomainError::persistence)?)),
            None => Ok(None),
        }
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Thread>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("SELECT {THREAD_COLUMNS} FROM threads WHERE id IN ({placeholders})");
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(DomainError::persistence)?;

        rows.iter()
            .map(map_thread)
            .collect::<sqlx::Result<Vec<_>>>()
            .map_err(DomainError::persistence)
    }

    async fn page_for_forum(&self, forum_id: i64, limit: i64, offset: i64) -> Result<Vec<Thread>> {
        let rows = sqlx::query(&format!(
            "SELECT {THREAD_COLUMNS} FROM threads WHERE forum_id = ? \
             ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        ))
        .bind(forum_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::persistence)?;

        rows.iter()
            .map(map_thread)
            .collect::<sqlx::Result<Vec<_>>>()
            .map_err(DomainError::persistence)
    }

    async fn count_for_forum(&self, forum_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM threads WHERE forum_id = ?")
            .bind(forum_id)
            .fetch_one(&self.pool)
            .await
            .map_err(DomainError::persistence)?;
        Ok(count)
    }

    async fn search(&self, term: &str, limit: i64) -> Result<Vec<Thread>> {
        let pattern = format!("%{}%", term.to_lowercase());
        let rows = sqlx::query(&format!(
            "SELECT {THREAD_COLUMNS} FROM threads \
             WHERE lower(title) LIKE ?1 OR lower(content) LIKE ?1 OR lower(author) LIKE ?1 \
             ORDER BY created_at DESC, id DESC LIMIT ?2"
        ))
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::persistence)?;

        rows.iter()
            .map(map_thread)
            .collect::<sqlx::Result<Vec<_>>>()
            .map_err(DomainError::persistence)
    }

    /// The one raw aggregate in the store. The outer join keeps threads
    /// with no replies; `COALESCE` then falls back to the thread's own
    /// creation time. Ties in `latest_activity` keep whatever order the
    /// grouping produced.
    async fn recent_activity(&self, limit: i64) -> Result<Vec<ThreadActivity>> {
        let rows = sqlx::query(
            "SELECT t.id, t.forum_id, t.title, t.author, t.content, t.created_at, \
                    f.name AS forum_name, \
                    COUNT(r.id) AS reply_count, \
                    MAX(r.created_at) AS last_reply_at, \
                    COALESCE(MAX(r.created_at), t.created_at) AS latest_activity \
             FROM threads t \
             JOIN forums f ON f.id = t.forum_id \
             LEFT JOIN replies r ON r.thread_id = t.id \
             GROUP BY t.id \
             ORDER BY latest_activity DESC \
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::persistence)?;

        rows.iter()
            .map(map_activity)
            .collect::<sqlx::Result<Vec<_>>>()
            .map_err(DomainError::persistence)
    }

    /// Explicit two-statement delete. The schema's cascade would cover
    /// this on its own; the transaction keeps the pair atomic even if the
    /// cascade rule ever goes away.
    async fn delete_with_replies(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(DomainError::persistence)?;

        sqlx::query("DELETE FROM replies WHERE thread_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DomainError::persistence)?;
        sqlx::query("DELETE FROM threads WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DomainError::persistence)?;

        tx.commit().await.map_err(DomainError::persistence)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{ForumRepo, NewForum, NewReply, ReplyRepo};

    async fn seed_forum(store: &SqliteStore) -> i64 {
        ForumRepo::create(
            store,
            NewForum {
                name: "General".to_string(),
                slug: None,
                description: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    async fn seed_thread(store: &SqliteStore, forum_id: i64, title: &str) -> Thread {
        ThreadRepo::create(
            store,
            NewThread {
                forum_id,
                title: title.to_string(),
                author: None,
                content: format!("{title} body"),
            },
        )
        .await
        .unwrap()
    }

    async fn seed_reply(store: &SqliteStore, thread_id: i64, content: &str) -> i64 {
        ReplyRepo::create(
            store,
            NewReply {
                thread_id,
                author: None,
                content: content.to_string(),
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn create_then_find_roundtrips() {
        let store = SqliteStore::in_memory().await.unwrap();
        let forum_id = seed_forum(&store).await;

        let created = ThreadRepo::create(
            &store,
            NewThread {
                forum_id,
                title: "Hello".to_string(),
                author: Some("ada".to_string()),
                content: "First".to_string(),
            },
        )
        .await
        .unwrap();

        let found = ThreadRepo::find_by_id(&store, created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.title, "Hello");
        assert_eq!(found.author.as_deref(), Some("ada"));
        assert_eq!(found.created_at, created.created_at);
    }

    #[tokio::test]
    async fn pages_walk_newest_first() {
        let store = SqliteStore::in_memory().await.unwrap();
        let forum_id = seed_forum(&store).await;
        let t1 = seed_thread(&store, forum_id, "first").await;
        let t2 = seed_thread(&store, forum_id, "second").await;
        let t3 = seed_thread(&store, forum_id, "third").await;

        assert_eq!(ThreadRepo::count_for_forum(&store, forum_id).await.unwrap(), 3);

        let page1 = ThreadRepo::page_for_forum(&store, forum_id, 2, 0).await.unwrap();
        let page2 = ThreadRepo::page_for_forum(&store, forum_id, 2, 2).await.unwrap();
        let ids1: Vec<i64> = page1.iter().map(|t| t.id).collect();
        let ids2: Vec<i64> = page2.iter().map(|t| t.id).collect();
        assert_eq!(ids1, vec![t3.id, t2.id]);
        assert_eq!(ids2, vec![t1.id]);
    }

    #[tokio::test]
    async fn find_by_ids_skips_missing_rows() {
        let store = SqliteStore::in_memory().await.unwrap();
        let forum_id = seed_forum(&store).await;
        let t1 = seed_thread(&store, forum_id, "kept").await;

        let found = ThreadRepo::find_by_ids(&store, &[t1.id, 9999]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, t1.id);

        assert!(ThreadRepo::find_by_ids(&store, &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_covers_title_content_and_author() {
        let store = SqliteStore::in_memory().await.unwrap();
        let forum_id = seed_forum(&store).await;

        let by_title = seed_thread(&store, forum_id, "Rust tips").await;
        let by_content = ThreadRepo::create(
            &store,
            NewThread {
                forum_id,
                title: "Unrelated".to_string(),
                author: None,
                content: "I adore RUST".to_string(),
            },
        )
        .await
        .unwrap();
        let by_author = ThreadRepo::create(
            &store,
            NewThread {
                forum_id,
                title: "Other".to_string(),
                author: Some("rustacean".to_string()),
                content: "nothing here".to_string(),
            },
        )
        .await
        .unwrap();
        seed_thread(&store, forum_id, "noise").await;

        let hits = ThreadRepo::search(&store, "rust", 20).await.unwrap();
        let ids: Vec<i64> = hits.iter().map(|t| t.id).collect();
        // Three matches, newest insert first.
        assert_eq!(ids, vec![by_author.id, by_content.id, by_title.id]);

        let capped = ThreadRepo::search(&store, "rust", 2).await.unwrap();
        assert_eq!(capped.len(), 2);

        assert!(ThreadRepo::search(&store, "zyzzyva", 20).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn activity_falls_back_to_thread_creation_time() {
        let store = SqliteStore::in_memory().await.unwrap();
        let forum_id = seed_forum(&store).await;
        let quiet = seed_thread(&store, forum_id, "quiet").await;

        let rows = ThreadRepo::recent_activity(&store, 40).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].thread.id, quiet.id);
        assert_eq!(rows[0].forum_name, "General");
        assert_eq!(rows[0].reply_count, 0);
        assert_eq!(rows[0].last_reply_at, None);
        assert_eq!(rows[0].latest_activity, quiet.created_at);
    }

    #[tokio::test]
    async fn activity_sorts_by_latest_reply_and_honors_limit() {
        let store = SqliteStore::in_memory().await.unwrap();
        let forum_id = seed_forum(&store).await;
        let old = seed_thread(&store, forum_id, "old").await;
        let newer = seed_thread(&store, forum_id, "newer").await;
        let newest = seed_thread(&store, forum_id, "newest").await;
        // Two replies land on the oldest thread, bumping it to the top.
        seed_reply(&store, old.id, "bump one").await;
        seed_reply(&store, old.id, "bump two").await;

        let rows = ThreadRepo::recent_activity(&store, 40).await.unwrap();
        let ids: Vec<i64> = rows.iter().map(|row| row.thread.id).collect();
        assert_eq!(ids, vec![old.id, newest.id, newer.id]);
        assert_eq!(rows[0].reply_count, 2);
        assert!(rows[0].last_reply_at.is_some());
        assert_eq!(rows[0].latest_activity, rows[0].last_reply_at.unwrap());

        let capped = ThreadRepo::recent_activity(&store, 2).await.unwrap();
        assert_eq!(capped.len(), 2);
    }

    #[tokio::test]
    async fn delete_with_replies_removes_the_whole_subtree() {
        let store = SqliteStore::in_memory().await.unwrap();
        let forum_id = seed_forum(&store).await;
        let thread = seed_thread(&store, forum_id, "doomed").await;
        seed_reply(&store, thread.id, "one").await;
        seed_reply(&store, thread.id, "two").await;

        ThreadRepo::delete_with_replies(&store, thread.id).await.unwrap();

        assert!(ThreadRepo::find_by_id(&store, thread.id).await.unwrap().is_none());
        let remaining: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM replies WHERE thread_id = ?")
                .bind(thread.id)
                .fetch_one(store.pool())
                .await
                .unwrap();
        assert_eq!(remaining, 0);
    }
}
