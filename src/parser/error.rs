//! Error types for the HTTP parser.

use thiserror::Error;

/// Errors that can occur during HTTP request parsing.
///
/// The `Display` text of each variant is the message the server writes back
/// to the client inside the 400 response body, so the wording is part of the
/// wire contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The read window contains no CRLF, so there is no request line.
    #[error("Can't read request line")]
    MissingRequestLine,

    /// The request line does not consist of exactly three space-separated
    /// tokens (method, path, version).
    #[error("Incorrect request line")]
    MalformedRequestLine,

    /// The HTTP method is not in the allowed set.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The request path does not begin with `/`.
    #[error("Incorrect request path")]
    InvalidPath,

    /// The header block is not terminated by a blank line.
    #[error("Incorrect headers")]
    MissingHeaderTerminator,
}
