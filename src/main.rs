use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use minilytics::config::CONFIG;
use minilytics::router::create_router;
use minilytics::store::FileStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // CORS
    let cors_layer = if CONFIG.cors == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers(Any)
    } else {
        let origins: Vec<_> = CONFIG
            .cors
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers(Any)
    };

    let store = Arc::new(FileStore::new(&CONFIG.data_file));

    let app = create_router(store)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Shutting down");
    };

    let addr: SocketAddr = CONFIG.web_addr.parse().expect("Invalid address");
    tracing::info!("Minilytics listening on {}", addr);
    tracing::info!("Dashboard: http://{}/", addr);
    tracing::info!("Beacon script: {}/track.js", CONFIG.domain);
    tracing::info!("Hits append to {}", CONFIG.data_file);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .unwrap();
}
