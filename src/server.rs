//! Axum router and server setup.
//! Used by: main.

use std::net::SocketAddr;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;

use crate::admission;
use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index::index))
        .route("/health", get(handlers::health::health))
        .route("/metrics", get(handlers::metrics::metrics))
        .layer(middleware::from_fn_with_state(state.clone(), admission::admit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(state: AppState, addr: &str, shutdown: watch::Sender<bool>) -> std::io::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(shutdown))
    .await
}

/// Ctrl-C drains the server and is relayed to the reclaimer through the
/// shared watch channel.
async fn shutdown_signal(shutdown: watch::Sender<bool>) {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
    let _ = shutdown.send(true);
}
