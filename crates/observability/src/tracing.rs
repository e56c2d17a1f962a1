//! Tracing/logging initialization.
//!
//! Both long-running processes (api, worker) log structured JSON to stdout so
//! the container runtime can collect them. `RUST_LOG` controls the filter;
//! `LOG_FORMAT=text` switches to the human-readable formatter for local runs.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if std::env::var("LOG_FORMAT").as_deref() == Ok("text") {
        let _ = builder.try_init();
    } else {
        let _ = builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init();
    }
}
