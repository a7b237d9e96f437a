//! A minimal HTTP/1.1 server library.
//!
//! This library parses raw byte streams into structured requests, routes
//! them to registered handlers by method and path pattern, and lets each
//! handler stream its own response back over the connection. One request
//! per connection, `Connection: close` always; keep-alive, TLS, HTTP/2 and
//! chunked transfer are out of scope.
//!
//! # Features
//!
//! - Byte-level request framing over a single 4096-byte read window
//! - Ordered query parameters, raw ordered header lines, form-encoded bodies
//! - Regex path patterns with anchored full-match semantics
//! - A bounded worker pool (64 workers by default) for concurrent connections
//! - Protocol failures answered with a fixed-format 400 JSON response
//! - Routing misses answered with an explicit 404
//!
//! # Examples
//!
//! ## Parsing a request
//!
//! ```
//! use tinyhttp_rs::parse_request;
//!
//! let request_bytes = b"GET /index.html?lang=en HTTP/1.1\r\nHost: example.com\r\n\r\n";
//!
//! match parse_request(request_bytes) {
//!     Ok(request) => {
//!         println!("Method: {}", request.method);
//!         println!("Path: {}", request.path);
//!         println!("Query: {:?}", request.query_params);
//!         println!("Headers: {:?}", request.headers);
//!     },
//!     Err(err) => {
//!         println!("Error parsing request: {}", err);
//!     }
//! }
//! ```
//!
//! ## Running a server
//!
//! ```no_run
//! use tinyhttp_rs::{
//!     HandlerFuture, HttpResponse, HttpServer, Method, Request, ResponseSink, ServerConfig,
//!     StatusCode,
//! };
//! use tokio::io::AsyncWriteExt;
//!
//! fn hello(_request: Request, out: &mut ResponseSink) -> HandlerFuture<'_> {
//!     Box::pin(async move {
//!         let response = HttpResponse::new(StatusCode::Ok)
//!             .with_content_type("text/plain")
//!             .with_body_string("Hello, World!");
//!         out.write_all(&response.to_bytes()).await?;
//!         out.flush().await?;
//!         Ok(())
//!     })
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = HttpServer::new(ServerConfig::default());
//!     server.add_handler(Method::GET, "/hello", hello).await?;
//!     server.listen().await?;
//!     Ok(())
//! }
//! ```
//!
//! See the `demos` directory for a complete static-site collaborator built
//! on the registration API.

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{parse_request, Body, Error as ParserError, Method, Request};
pub use server::{
    Error as ServerError, HandlerFn, HandlerFuture, HttpResponse, HttpServer, ResponseSink,
    Router, ServerConfig, StatusCode,
};
