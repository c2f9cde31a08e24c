//! agora/crates/configs/src/lib.rs
//!
//! Layered runtime configuration: built-in defaults, then an optional
//! `agora.toml` next to the working directory, then `AGORA__*` environment
//! variables (double underscore separates nesting, e.g.
//! `AGORA__SERVER__PORT=8080`). A `.env` file is honored when present.

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub pages: PageConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL; kept behind `SecretString` so it never lands in
    /// logs even if it carries credentials one day.
    pub url: SecretString,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize)]
pub struct PageConfig {
    pub threads_per_page: i64,
    pub replies_per_page: i64,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is the normal case outside development.
        dotenvy::dotenv().ok();

        let settings = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "sqlite://agora.db")?
            .set_default("database.max_connections", 5)?
            .set_default("pages.threads_per_page", 10)?
            .set_default("pages.replies_per_page", 10)?
            .add_source(File::with_name("agora").required(false))
            .add_source(Environment::with_prefix("AGORA").separator("__"))
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        debug!(
            "Configuration loaded: listening on {}:{}",
            loaded.server.host, loaded.server.port
        );
        Ok(loaded)
    }
}
