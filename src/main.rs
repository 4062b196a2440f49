//! Turnstile: fixed-window request admission for axum services.
//! Used by: binary entrypoint.

pub mod admission;
pub mod config;
pub mod error;
pub mod handlers;
pub mod limiter;
pub mod registry;
pub mod server;
pub mod state;
pub mod sweeper;
pub mod telemetry;

use tokio::sync::watch;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let rules = config::Rules::from_default_file();
    if rules.is_empty() {
        tracing::warn!("no limit rules loaded; all requests pass through");
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let state = state::build_state(&rules, shutdown_rx);
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    tracing::info!(limiters = state.registry.len(), "starting turnstile on {}", addr);

    server::run(state, &addr, shutdown_tx).await?;
    Ok(())
}
