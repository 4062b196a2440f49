//! Admission decision engine: resolves a request to a limiter and applies
//! the fixed-window check before the downstream handler runs.
//! Used by: server.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::Error;
use crate::state::AppState;

/// Middleware entry point. Allow delegates to the next handler unchanged;
/// deny short-circuits with 429 and the downstream handler never runs.
/// Requests matching no rule pass through with no accounting at all.
pub async fn admit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let ip = client_ip(&request);
    let path = request.uri().path().to_owned();

    let allowed = match state.registry.resolve(&ip, &path) {
        None => {
            state.metrics.record_pass_through();
            return next.run(request).await;
        }
        Some(limiter) => limiter.admit(&ip),
    };

    if !allowed {
        state.metrics.record_denied();
        tracing::debug!(%ip, %path, "request denied");
        return Error::RateExceeded.into_response();
    }
    state.metrics.record_allowed();
    next.run(request).await
}

/// Client identity resolution: forwarded headers first, transport address
/// last. Header values are trusted as-is; deployments without a reverse
/// proxy stripping them inherit the spoofing risk.
fn client_ip(request: &Request) -> String {
    if let Some(ip) = header_ip(request.headers(), "x-forwarded-for") {
        return ip;
    }
    if let Some(ip) = header_ip(request.headers(), "x-real-ip") {
        return ip;
    }
    if let Some(info) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return info.0.ip().to_string();
    }
    "unknown".to_owned()
}

fn header_ip(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)?
        .to_str()
        .ok()?
        .split(',')
        .map(str::trim)
        .find(|part| !part.is_empty())
        .map(str::to_owned)
}
