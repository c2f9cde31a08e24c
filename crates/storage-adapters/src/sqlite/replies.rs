use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use domains::{DomainError, NewReply, Reply, ReplyRepo, Result};

use super::SqliteStore;

const REPLY_COLUMNS: &str = "id, thread_id, author, content, created_at";

fn map_reply(row: &SqliteRow) -> sqlx::Result<Reply> {
    Ok(Reply {
        id: row.try_get("id")?,
        thread_id: row.try_get("thread_id")?,
        author: row.try_get("author")?,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl ReplyRepo for SqliteStore {
    async fn create(&self, reply: NewReply) -> Result<Reply> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO replies (thread_id, author, content, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(reply.thread_id)
        .bind(&reply.author)
        .bind(&reply.content)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(DomainError::persistence)?;

        Ok(Reply {
            id: result.last_insert_rowid(),
            thread_id: reply.thread_id,
            author: reply.author,
            content: reply.content,
            created_at,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Reply>> {
        let row = sqlx::query(&format!("SELECT {REPLY_COLUMNS} FROM replies WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DomainError::persistence)?;

        match row {
            Some(row) => Ok(Some(map_reply(&row).map_err(DomainError::persistence)?)),
            None => Ok(None),
        }
    }

    async fn page_for_thread(&self, thread_id: i64, limit: i64, offset: i64) -> Result<Vec<Reply>> {
        let rows = sqlx::query(&format!(
            "SELECT {REPLY_COLUMNS} FROM replies WHERE thread_id = ? \
             ORDER BY created_at ASC, id ASC LIMIT ? OFFSET ?"
        ))
        .bind(thread_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::persistence)?;

        rows.iter()
            .map(map_reply)
            .collect::<sqlx::Result<Vec<_>>>()
            .map_err(DomainError::persistence)
    }

    async fn count_for_thread(&self, thread_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM replies WHERE thread_id = ?")
            .bind(thread_id)
            .fetch_one(&self.pool)
            .await
            .map_err(DomainError::persistence)?;
        Ok(count)
    }

    async fn search(&self, term: &str, limit: i64) -> Result<Vec<Reply>> {
        let pattern = format!("%{}%", term.to_lowercase());
        let rows = sqlx::query(&format!(
            "SELECT {REPLY_COLUMNS} FROM replies \
             WHERE lower(content) LIKE ?1 OR lower(author) LIKE ?1 \
             ORDER BY created_at DESC, id DESC LIMIT ?2"
        ))
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::persistence)?;

        rows.iter()
            .map(map_reply)
            .collect::<sqlx::Result<Vec<_>>>()
            .map_err(DomainError::persistence)
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM replies WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DomainError::persistence)?;
        Ok(result.rows_affected())
    }
}
