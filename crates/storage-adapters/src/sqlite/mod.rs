//! # SQLite store
//!
//! Maps the relational schema in `migrations/` to the `domains` models.
//! One `SqliteStore` implements all four repository ports; handlers share
//! it through `Arc<dyn ...>` handles. Row mapping is by hand, column by
//! column, so the domain crates stay free of driver types.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;
use uuid::Uuid;

mod forums;
mod replies;
mod threads;
mod users;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if missing) the database at `url` and brings the
    /// schema up to date. Foreign keys are switched on for every
    /// connection; the cascade rules depend on it.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        MIGRATOR.run(&pool).await?;
        info!("Opened SQLite store at {}", url);
        Ok(Self { pool })
    }

    /// Store over a fresh in-memory database, for tests. Capped at one
    /// connection: each pooled connection would otherwise see its own
    /// empty database.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        MIGRATOR.run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Waits for in-flight queries and closes every connection. Called on
    /// graceful shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

// Helpers for UUID conversion
fn uuid_to_blob(id: Uuid) -> Vec<u8> {
    id.as_bytes().to_vec()
}

fn blob_to_uuid(blob: &[u8]) -> Uuid {
    Uuid::from_slice(blob).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrations_apply_to_a_fresh_database() {
        let store = SqliteStore::in_memory().await.unwrap();
        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(store.pool())
        .await
        .unwrap();
        for expected in ["forums", "threads", "replies", "users"] {
            assert!(tables.iter().any(|t| t == expected), "missing {expected}");
        }
    }

    #[test]
    fn uuid_blob_roundtrip() {
        let id = Uuid::new_v4();
        assert_eq!(blob_to_uuid(&uuid_to_blob(id)), id);
        assert_eq!(blob_to_uuid(&[1, 2, 3]), Uuid::default());
    }
}
