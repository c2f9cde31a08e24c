//! Route table for the page surface.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the full application router over an injected [`AppState`].
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/forums", post(handlers::create_forum))
        .route("/forums/{id}", get(handlers::forum_page))
        .route("/forums/{id}/threads", post(handlers::create_thread))
        .route("/forums/{id}/delete", post(handlers::delete_forum))
        .route("/threads/{id}", get(handlers::thread_page))
        .route("/threads/{id}/replies", post(handlers::create_reply))
        .route("/threads/{id}/delete", post(handlers::delete_thread))
        .route("/replies/{id}/delete", post(handlers::delete_reply))
        .route("/search", get(handlers::search_page))
        .route("/activity", get(handlers::activity_page))
        .route("/users", get(handlers::users_page).post(handlers::create_user))
        .route("/users/{id}/delete", post(handlers::delete_user))
        .route("/metrics", get(handlers::metrics_endpoint))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
