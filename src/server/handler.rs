//! The handler seam between the routing core and registered collaborators.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::io::AsyncWrite;

use crate::parser::Request;
use crate::server::Error;

/// The writable side of a connection, handed to exactly one handler per
/// connection. The handler must write a complete HTTP response to it
/// (status line, headers including `Content-Length` and
/// `Connection: close`, body) and flush.
pub type ResponseSink = dyn AsyncWrite + Send + Unpin;

/// Type alias for the boxed future a handler returns. The lifetime ties the
/// future to the borrow of the response sink.
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<(), Error>> + Send + 'a>>;

/// Type alias for a shared handler function.
///
/// Handlers are usually written as plain `fn` items:
///
/// ```
/// use tinyhttp_rs::{HandlerFuture, Request, ResponseSink};
/// use tokio::io::AsyncWriteExt;
///
/// fn hello(_request: Request, out: &mut ResponseSink) -> HandlerFuture<'_> {
///     Box::pin(async move {
///         let body = "hello";
///         let head = format!(
///             "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
///             body.len()
///         );
///         out.write_all(head.as_bytes()).await?;
///         out.write_all(body.as_bytes()).await?;
///         out.flush().await?;
///         Ok(())
///     })
/// }
/// # let _: tinyhttp_rs::HandlerFn = std::sync::Arc::new(hello);
/// ```
pub type HandlerFn =
    Arc<dyn for<'a> Fn(Request, &'a mut ResponseSink) -> HandlerFuture<'a> + Send + Sync>;
