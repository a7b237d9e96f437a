//! HTTP parser module.
//!
//! This module turns the raw bytes of one read window into a structured
//! [`Request`]: request-line framing, header-block framing and body
//! extraction, all driven by delimiter scanning over the byte buffer.

mod request;
mod method;
mod scan;
mod error;

// Re-export public items
pub use request::{Body, Request};
pub use method::Method;
pub use scan::find;
pub use error::Error;

// Re-export the parse_request function
pub use request::parse_request;
