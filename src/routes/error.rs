//! Routing error types

use thiserror::Error;

/// Errors returned by [`RouteTable::resolve`](super::RouteTable::resolve)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// No binding matches the requested path
    #[error("No route matches path: {0}")]
    NotFound(String),

    /// A redirect chain revisited a path it had already passed through
    #[error("Redirect loop detected: {}", chain.join(" -> "))]
    RedirectLoop { chain: Vec<String> },
}

/// Errors raised while building a route table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("Duplicate route path: {0}")]
    DuplicatePath(String),

    #[error("Route path must start with '/': {0:?}")]
    InvalidPath(String),

    #[error("Redirect from {from} points to unknown path {to}")]
    DanglingRedirect { from: String, to: String },
}
