use axum::{routing::get, Router};

pub mod messages;
pub mod system;

/// Router for the public API surface.
pub fn router() -> Router {
    Router::new()
        .route(
            "/api/messages",
            get(messages::list_messages).post(messages::create_message),
        )
        .route("/api/health", get(system::health))
        .route("/api/stats", get(system::stats))
}
