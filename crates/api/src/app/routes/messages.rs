use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    Json,
};
use serde_json::json;

use relay_core::{resolve_text, ListLimit};

use crate::app::{dto, services::AppServices};

/// POST handler: accept a payload and fan it out to both stores.
///
/// Always responds 200; each store's outcome is reported in the body. A
/// missing, invalid, or empty body falls back to the configured default
/// text.
pub async fn create_message(
    Extension(services): Extension<Arc<AppServices>>,
    body: Option<Json<dto::CreateMessageRequest>>,
) -> Json<serde_json::Value> {
    let submitted = body.and_then(|Json(b)| b.text);
    let text = resolve_text(submitted, services.default_text());

    let receipt = services.submit(text).await;

    Json(json!({
        "text": receipt.text,
        "postgres": receipt.postgres,
        "redis": receipt.redis,
    }))
}

/// GET handler: the newest inputs plus the key-value telemetry snapshot.
///
/// Store failures never produce a 500 here; the failing side is replaced by
/// an `error: ...` string in the same 200 response.
pub async fn list_messages(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ListParams>,
) -> Json<serde_json::Value> {
    let limit = ListLimit::from_param(params.limit.as_deref());

    let messages = match services.recent_messages(limit).await {
        Ok(records) => json!(records),
        Err(err) => json!(format!("error: {err}")),
    };
    let redis = match services.queue_snapshot().await {
        Ok(snapshot) => json!(snapshot),
        Err(err) => json!(format!("error: {err}")),
    };

    Json(json!({
        "messages": messages,
        "redis": redis,
    }))
}
