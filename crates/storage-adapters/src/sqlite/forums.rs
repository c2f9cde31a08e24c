use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use domains::{DomainError, Forum, ForumRepo, NewForum, Result};

use super::SqliteStore;

fn map_forum(row: &SqliteRow) -> sqlx::Result<Forum> {
    Ok(Forum {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        slug: row.try_get("slug")?,
        description: row.try_get("description")?,
    })
}

#[async_trait]
impl ForumRepo for SqliteStore {
    async fn create(&self, forum: NewForum) -> Result<Forum> {
        let result = sqlx::query("INSERT INTO forums (name, slug, description) VALUES (?, ?, ?)")
            .bind(&forum.name)
            .bind(&forum.slug)
            .bind(&forum.description)
            .execute(&self.pool)
            .await
            .map_err(DomainError::persistence)?;

        Ok(Forum {
            id: result.last_insert_rowid(),
            name: forum.name,
            slug: forum.slug,
            description: forum.description,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Forum>> {
        let row = sqlx::query("SELECT id, name, slug, description FROM forums WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DomainError::persistence)?;

        match row {
            Some(row) => Ok(Some(map_forum(&row).map_err(DomainError::persistence)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Forum>> {
        let rows = sqlx::query("SELECT id, name, slug, description FROM forums ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(DomainError::persistence)?;

        rows.iter()
            .map(map_forum)
            .collect::<sqlx::Result<Vec<_>>>()
            .map_err(DomainError::persistence)
    }

    /// The schema's `ON DELETE CASCADE` chain takes the forum's threads
    /// and their replies down with it.
    async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM forums WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DomainError::persistence)?;
        Ok(result.rows_affected())
    }
}
