//! Error types for the HTTP server.

use thiserror::Error;

use crate::parser::Error as ParserError;

/// Errors that can occur during HTTP server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be parsed. A 400 response has already been
    /// written by the time this surfaces.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// I/O error on the listener or a connection.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// No handler registered for the request's method and path. A 404
    /// response has already been written by the time this surfaces.
    #[error("No handler for path: {0}")]
    NotFound(String),

    /// A route pattern failed to compile at registration time.
    #[error("Invalid route pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Internal server error reported by a handler.
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// JSON serialization error while building a response.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
