//! agora/crates/api-adapters/src/lib.rs
//!
//! The server-rendered HTTP surface: axum handlers behind the `web-axum`
//! feature, askama templates with typed view models, error-to-status
//! mapping, and the Prometheus registry.

pub mod metrics;
pub mod state;
pub mod templates;

#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod routes;

#[cfg(feature = "web-axum")]
pub use routes::router;
pub use state::{AppState, PageSettings};
