//! agora/crates/storage-adapters/src/lib.rs
//!
//! Storage implementations of the `domains` ports. The SQLite adapter is
//! the only backend and sits behind the `db-sqlite` feature so the domain
//! and service crates never link against a database driver.

#[cfg(feature = "db-sqlite")]
pub mod sqlite;

#[cfg(feature = "db-sqlite")]
pub use sqlite::SqliteStore;
