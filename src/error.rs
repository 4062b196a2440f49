//! Unified error types for turnstile.
//! Used by: config, admission, main.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("too many requests")]
    RateExceeded,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("rules parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::RateExceeded => StatusCode::TOO_MANY_REQUESTS,
            Error::Io(_) | Error::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_exceeded_returns_429() {
        let response = Error::RateExceeded.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn io_error_returns_500() {
        let err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn parse_error_returns_500() {
        let err: Error = serde_json::from_str::<Vec<u32>>("not json").unwrap_err().into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_messages_are_descriptive() {
        assert_eq!(Error::RateExceeded.to_string(), "too many requests");
    }
}
