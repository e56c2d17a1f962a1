//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store/queue wiring and the dual-write submission path
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::middleware::{self, RequestStats};

pub mod dto;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    let stats = RequestStats::new();

    routes::router()
        .layer(
            ServiceBuilder::new()
                .layer(Extension(services))
                .layer(Extension(stats.clone())),
        )
        .layer(axum::middleware::from_fn_with_state(
            stats,
            middleware::track_request,
        ))
}
