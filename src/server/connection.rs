//! Per-connection handling: parse → route → invoke → flush.

use std::sync::Arc;

use log::debug;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::RwLock;

use crate::parser::parse_request;
use crate::server::error::Error;
use crate::server::handler::ResponseSink;
use crate::server::response::{bad_request, not_found};
use crate::server::router::Router;

/// Handle one accepted connection.
///
/// Reads a single request window, parses it, selects a handler and hands it
/// exclusive write access to the connection. Every failure is answered on
/// this connection before the error is returned to the worker:
///
/// * a parse failure writes the fixed 400 response and stops,
/// * a routing miss writes a 404 response and stops,
/// * a handler failure is the handler's responsibility; the connection is
///   closed either way when the worker drops the socket.
///
/// No state outside this connection is touched, and nothing is retried.
pub async fn handle_connection(
    socket: &mut (impl AsyncRead + AsyncWrite + Send + Unpin + 'static),
    router: Arc<RwLock<Router>>,
    read_buffer_size: usize,
) -> Result<(), Error> {
    // One read window; a short read is fine if the peer sent less
    let mut buf = vec![0; read_buffer_size];
    let read = socket.read(&mut buf).await?;
    if read == 0 {
        // Peer closed before sending anything
        return Ok(());
    }

    let request = match parse_request(&buf[..read]) {
        Ok(request) => request,
        Err(e) => {
            socket.write_all(&bad_request(&e.to_string())).await?;
            socket.flush().await?;
            return Err(Error::ParseError(e));
        }
    };

    debug!("{} {}", request.method, request.path);

    // The read guard is dropped before the handler runs so a slow handler
    // never holds the routing table
    let handler = {
        let router = router.read().await;
        router.route(request.method, &request.path)
    };

    let Some(handler) = handler else {
        let message = format!("No handler for path: {}", request.path);
        socket.write_all(&not_found(&message)).await?;
        socket.flush().await?;
        return Err(Error::NotFound(request.path));
    };

    // The handler owns the response from here and must terminate it
    let sink: &mut ResponseSink = &mut *socket;
    (handler)(request, sink).await?;
    socket.flush().await?;

    Ok(())
}
