//! Demo root endpoint.
//! Used by: server.

use axum::http::Uri;

pub async fn index(uri: Uri) -> String {
    format!("request processed for {}\n", uri.path())
}
