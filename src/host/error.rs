//! Static host error types
//!
//! Converted to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    /// `index.html` is missing from the dist directory
    #[error("SPA entry {path:?} unavailable: {error}")]
    MissingEntry { path: PathBuf, error: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for HostError {
    fn into_response(self) -> Response {
        let code = match &self {
            HostError::MissingEntry { .. } => "MISSING_ENTRY",
            HostError::Io(_) => "IO_ERROR",
        };

        tracing::error!(error_code = %code, error_message = %self, "Static host error");

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

pub type HostResult<T> = Result<T, HostError>;
