//! HTTP server module.
//!
//! This module provides the connection-handling side of the crate: the
//! routing table, the per-connection parse → route → invoke pipeline, and
//! the listener with its bounded worker pool.

mod response;
mod config;
mod error;
mod handler;
mod router;
mod connection;
mod http_server;
mod tests;

// Re-export public items
pub use response::{bad_request, not_found, HttpResponse, StatusCode};
pub use config::{ServerConfig, DEFAULT_READ_BUFFER_SIZE, DEFAULT_WORKER_COUNT};
pub use error::Error;
pub use handler::{HandlerFn, HandlerFuture, ResponseSink};
pub use router::Router;
pub use connection::handle_connection;
pub use http_server::HttpServer;
