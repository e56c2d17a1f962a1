use std::sync::Arc;

use relay_infra::AppConfig;

#[tokio::main]
async fn main() {
    relay_observability::init();

    let config = AppConfig::from_env();
    let mode = std::env::args().nth(1).unwrap_or_else(|| "web".to_string());

    if mode == "migrate" {
        // One-shot schema bootstrap, run as its own step before the
        // long-running services come up.
        tracing::info!("running migrations in one-shot mode");
        relay_api::app::services::run_migrations(&config)
            .await
            .expect("schema bootstrap failed");
        return;
    }

    let services = Arc::new(
        relay_api::app::services::build_services(&config)
            .await
            .expect("failed to wire services"),
    );
    let app = relay_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
