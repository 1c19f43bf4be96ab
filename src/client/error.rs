//! Client error types

use thiserror::Error;

/// Errors that can occur when talking to the evaluation backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// The resolved request URL could not be parsed
    #[error("Invalid request URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A configured header name or value is not valid HTTP
    #[error("Invalid header {name}: {message}")]
    InvalidHeader { name: String, message: String },

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The backend could not be reached
    #[error("Backend unavailable at {url}")]
    Unavailable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("API error {status} from {url}: {body}")]
    Status { status: u16, url: String, body: String },

    /// The response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ClientError {
    /// HTTP status of a non-2xx response
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
