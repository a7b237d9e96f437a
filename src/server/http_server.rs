//! HTTP server: listener and bounded worker pool.

use std::sync::Arc;

use log::{debug, error, info};
use tokio::net::TcpListener;
use tokio::sync::{RwLock, Semaphore};

use crate::parser::{Method, Request};
use crate::server::config::ServerConfig;
use crate::server::connection::handle_connection;
use crate::server::error::Error;
use crate::server::handler::{HandlerFuture, ResponseSink};
use crate::server::router::Router;

/// An HTTP server.
///
/// Handlers are registered first, then [`HttpServer::listen`] starts the
/// accept loop. Each accepted connection is dispatched to a worker from a
/// bounded pool and processed independently of every other connection.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    /// The routing table, shared read-mostly with every worker.
    pub router: Arc<RwLock<Router>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            router: Arc::new(RwLock::new(Router::new())),
        }
    }

    /// Register a handler under `(method, pattern)`.
    ///
    /// Registration is expected to complete before [`HttpServer::listen`]
    /// is called; once the accept loop runs, the routing table is only read.
    pub async fn add_handler<F>(
        &self,
        method: Method,
        pattern: &str,
        handler: F,
    ) -> Result<(), Error>
    where
        F: for<'a> Fn(Request, &'a mut ResponseSink) -> HandlerFuture<'a> + Send + Sync + 'static,
    {
        self.router
            .write()
            .await
            .add_handler(method, pattern, Arc::new(handler))
    }

    /// Log the registered endpoints at startup.
    async fn display_routes(&self) {
        let router = self.router.read().await;
        info!("Registered endpoints:");
        for (method, pattern) in router.routes() {
            info!("  {method} {pattern}");
        }
    }

    /// Bind the configured address and serve connections.
    ///
    /// Blocks forever on success; a bind or accept fault is fatal and
    /// propagates out, at which point the server stops. Per-connection
    /// failures are logged by the worker and never reach this loop.
    pub async fn listen(&self) -> Result<(), Error> {
        self.display_routes().await;

        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);

        // The worker pool: one permit per in-flight connection. Accepted
        // connections queue on the semaphore when all workers are busy.
        let workers = Arc::new(Semaphore::new(self.config.max_connections));

        loop {
            let (mut socket, addr) = listener.accept().await?;
            debug!("Connection from: {addr}");

            let permit = workers
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| Error::InternalError("worker pool closed".to_string()))?;

            let router = self.router.clone();
            let read_buffer_size = self.config.read_buffer_size;

            tokio::spawn(async move {
                // Held for the connection's lifetime; dropping it returns
                // the worker to the pool on every exit path
                let _permit = permit;

                if let Err(e) = handle_connection(&mut socket, router, read_buffer_size).await {
                    error!("Connection error from {addr}: {e}");
                }
                // The socket is dropped here, closing both directions
            });
        }
    }
}
