use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use domains::{DomainError, NewUser, Result, User, UserRepo};

use super::{blob_to_uuid, uuid_to_blob, SqliteStore};

fn map_user(row: &SqliteRow) -> sqlx::Result<User> {
    Ok(User {
        id: blob_to_uuid(row.try_get::<Vec<u8>, _>("id")?.as_slice()),
        email: row.try_get("email")?,
        username: row.try_get("username")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl UserRepo for SqliteStore {
    async fn create(&self, user: NewUser) -> Result<User> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO users (id, email, username, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(id))
        .bind(&user.email)
        .bind(&user.username)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(DomainError::persistence)?;

        Ok(User {
            id,
            email: user.email,
            username: user.username,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, username, created_at, updated_at FROM users WHERE id = ?",
        )
        .bind(uuid_to_blob(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::persistence)?;

        match row {
            Some(row) => Ok(Some(map_user(&row).map_err(DomainError::persistence)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(
            "SELECT id, email, username, created_at, updated_at FROM users ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::persistence)?;

        rows.iter()
            .map(map_user)
            .collect::<sqlx::Result<Vec<_>>>()
            .map_err(DomainError::persistence)
    }

    async fn delete(&self, id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await
            .map_err(DomainError::persistence)?;
        Ok(result.rows_affected())
    }
}
