//! Server configuration.

use std::net::SocketAddr;

/// How many connections may be in flight at once.
pub const DEFAULT_WORKER_COUNT: usize = 64;

/// One read window: the request line, headers and body must fit in a single
/// read of this many bytes.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4096;

/// HTTP server configuration.
#[derive(Clone)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The maximum number of concurrently processed connections.
    pub max_connections: usize,
    /// The read buffer size.
    pub read_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".parse().unwrap(),
            max_connections: DEFAULT_WORKER_COUNT,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}
