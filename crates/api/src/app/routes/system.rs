use std::sync::Arc;

use axum::{extract::Extension, Json};
use serde_json::json;

use crate::app::services::AppServices;
use crate::middleware::RequestStats;

/// GET handler: single-attempt probe of both backing stores.
pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> Json<serde_json::Value> {
    Json(json!({ "status": services.health().await }))
}

/// GET handler: process-lifetime request counters. Not persisted; resets on
/// restart.
pub async fn stats(Extension(stats): Extension<RequestStats>) -> Json<serde_json::Value> {
    Json(json!({
        "requests": stats.requests(),
        "errors": stats.errors(),
        "uptime_secs": stats.uptime_secs(),
    }))
}
