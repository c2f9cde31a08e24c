//! agora/cmd/agora/src/main.rs
//!
//! Binary entry point: load configuration, open the store, wire the
//! services into the router, serve until interrupted.

use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api_adapters::metrics::AppMetrics;
use api_adapters::{router, AppState, PageSettings};
use configs::AppConfig;
use services::{
    ActivityFeed, ForumService, HtmlSanitizer, ReplyService, SearchService, ThreadService,
    UserService,
};
use storage_adapters::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load().context("loading configuration")?;

    let store = Arc::new(
        SqliteStore::connect(
            config.database.url.expose_secret(),
            config.database.max_connections,
        )
        .await
        .context("opening the database")?,
    );

    let sanitizer = Arc::new(HtmlSanitizer::default_policy());
    let state = AppState {
        forums: Arc::new(ForumService::new(store.clone())),
        threads: Arc::new(ThreadService::new(
            store.clone(),
            store.clone(),
            sanitizer.clone(),
        )),
        replies: Arc::new(ReplyService::new(store.clone(), store.clone(), sanitizer)),
        users: Arc::new(UserService::new(store.clone())),
        search: Arc::new(SearchService::new(store.clone(), store.clone())),
        activity: Arc::new(ActivityFeed::new(store.clone())),
        pages: PageSettings {
            threads_per_page: config.pages.threads_per_page,
            replies_per_page: config.pages.replies_per_page,
        },
        metrics: Arc::new(AppMetrics::new()),
    };

    let app = router(state);

    let address = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!("Listening on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving")?;

    store.close().await;
    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
