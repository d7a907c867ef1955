use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::Ack;
use thiserror::Error;

/// Failure answered as `{success: false, message}`. The message is fixed per
/// endpoint; underlying errors are logged, never returned.
#[derive(Debug, Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(Ack::failed(self.message))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid bind address {addr}: {source}")]
    InvalidAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
