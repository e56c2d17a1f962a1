use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, middleware::Next, response::Response};

/// Request/error counters scoped to the process lifetime.
///
/// Lock-free atomics shared across handlers; no persistence guarantee, the
/// counts reset on restart.
#[derive(Clone)]
pub struct RequestStats {
    inner: Arc<StatsInner>,
}

struct StatsInner {
    started: Instant,
    requests: AtomicU64,
    errors: AtomicU64,
}

impl RequestStats {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StatsInner {
                started: Instant::now(),
                requests: AtomicU64::new(0),
                errors: AtomicU64::new(0),
            }),
        }
    }

    pub fn requests(&self) -> u64 {
        self.inner.requests.load(Ordering::Relaxed)
    }

    pub fn errors(&self) -> u64 {
        self.inner.errors.load(Ordering::Relaxed)
    }

    pub fn uptime_secs(&self) -> u64 {
        self.inner.started.elapsed().as_secs()
    }
}

impl Default for RequestStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Count every request, and every response that leaves with an error status.
pub async fn track_request(
    State(stats): State<RequestStats>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    stats.inner.requests.fetch_add(1, Ordering::Relaxed);

    let response = next.run(req).await;

    if response.status().is_client_error() || response.status().is_server_error() {
        stats.inner.errors.fetch_add(1, Ordering::Relaxed);
    }
    response
}
