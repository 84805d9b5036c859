use std::sync::Arc;
use std::time::Duration;

use sea_orm::Database;
use tracing::info;

use relaya_campaigns::config::Config;
use relaya_campaigns::router::build_router;
use relaya_campaigns::state::AppState;

#[tokio::main]
async fn main() {
    relaya_core::tracing::init_tracing();

    let config = Config::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    // One shared outbound client; every platform call inherits its timeout.
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("failed to build HTTP client");

    let state = AppState {
        db,
        redis,
        http,
        config: Arc::new(config),
    };

    let router = build_router(state.clone());
    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("campaigns service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
