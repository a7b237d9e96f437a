//! Tests for the HTTP server implementation.

#[cfg(test)]
mod server_tests {
    use std::io::{self, Cursor};
    use std::pin::Pin;
    use std::sync::Arc;
    use std::task::{Context, Poll};
    use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, ReadBuf};
    use tokio::sync::RwLock;
    use tokio::task::JoinSet;

    use crate::parser::{Method, Request};
    use crate::server::{
        bad_request, handle_connection, Error, HandlerFuture, HttpResponse, HttpServer,
        ResponseSink, Router, ServerConfig, StatusCode, DEFAULT_READ_BUFFER_SIZE,
        DEFAULT_WORKER_COUNT,
    };

    // Mock TcpStream for testing
    struct MockTcpStream {
        read_data: Cursor<Vec<u8>>,
        write_data: Vec<u8>,
    }

    impl MockTcpStream {
        fn new(read_data: Vec<u8>) -> Self {
            Self {
                read_data: Cursor::new(read_data),
                write_data: Vec::new(),
            }
        }

        fn written_data(&self) -> &[u8] {
            &self.write_data
        }
    }

    impl AsyncRead for MockTcpStream {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            let this = self.get_mut();
            let n = std::io::Read::read(&mut this.read_data, buf.initialize_unfilled())?;
            buf.advance(n);
            Poll::Ready(Ok(()))
        }
    }

    impl AsyncWrite for MockTcpStream {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            let this = self.get_mut();
            this.write_data.extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    fn empty_get(path: &str) -> Request {
        Request {
            method: Method::GET,
            path: path.to_string(),
            query_params: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    fn write_text(out: &mut ResponseSink, body: String) -> HandlerFuture<'_> {
        Box::pin(async move {
            let response = HttpResponse::new(StatusCode::Ok)
                .with_content_type("text/plain")
                .with_body_string(body);
            out.write_all(&response.to_bytes()).await?;
            out.flush().await?;
            Ok(())
        })
    }

    fn ok_handler(_request: Request, out: &mut ResponseSink) -> HandlerFuture<'_> {
        write_text(out, "Test response".to_string())
    }

    fn first_handler(_request: Request, out: &mut ResponseSink) -> HandlerFuture<'_> {
        write_text(out, "first".to_string())
    }

    fn second_handler(_request: Request, out: &mut ResponseSink) -> HandlerFuture<'_> {
        write_text(out, "second".to_string())
    }

    fn echo_handler(request: Request, out: &mut ResponseSink) -> HandlerFuture<'_> {
        Box::pin(async move {
            let name = request.query_param("name").unwrap_or("nobody").to_string();
            write_text(out, format!("hello {name} at {path}", path = request.path)).await
        })
    }

    fn failing_handler(_request: Request, out: &mut ResponseSink) -> HandlerFuture<'_> {
        let _ = out;
        Box::pin(async move { Err(Error::InternalError("handler gave up".to_string())) })
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.max_connections, DEFAULT_WORKER_COUNT);
        assert_eq!(config.max_connections, 64);
        assert_eq!(config.read_buffer_size, DEFAULT_READ_BUFFER_SIZE);
        assert_eq!(config.read_buffer_size, 4096);
    }

    #[test]
    fn test_bad_request_template() {
        let body = r#"{"message":"Incorrect request line"}"#;
        let expected = format!(
            "HTTP/1.1 400 Bad Request\r\nContent-Length: {}\r\nConnection: close\r\nContent-Type: application/json\r\n\r\n{}",
            body.len(),
            body
        );
        assert_eq!(bad_request("Incorrect request line"), expected.into_bytes());
    }

    #[tokio::test]
    async fn test_router_matches_literal_path() {
        let mut router = Router::new();
        router
            .add_handler(Method::GET, "/x", Arc::new(ok_handler))
            .unwrap();

        assert!(router.route(Method::GET, "/x").is_some());
        assert!(router.route(Method::GET, "/y").is_none());
        assert!(router.route(Method::POST, "/x").is_none());
    }

    #[tokio::test]
    async fn test_router_last_registration_wins() {
        let mut router = Router::new();
        router
            .add_handler(Method::GET, "/x", Arc::new(first_handler))
            .unwrap();
        router
            .add_handler(Method::GET, "/x", Arc::new(second_handler))
            .unwrap();

        let handler = router.route(Method::GET, "/x").unwrap();
        let mut out: Vec<u8> = Vec::new();
        handler(empty_get("/x"), &mut out).await.unwrap();

        let response = String::from_utf8_lossy(&out);
        assert!(response.contains("second"));
        assert!(!response.contains("first"));
    }

    #[tokio::test]
    async fn test_router_patterns_are_anchored() {
        let mut router = Router::new();
        router
            .add_handler(Method::GET, "/items/[0-9]+", Arc::new(ok_handler))
            .unwrap();

        assert!(router.route(Method::GET, "/items/123").is_some());
        assert!(router.route(Method::GET, "/items/abc").is_none());
        // Full match, not substring match
        assert!(router.route(Method::GET, "/items/123/extra").is_none());
        assert!(router.route(Method::GET, "/prefix/items/123").is_none());
    }

    #[tokio::test]
    async fn test_router_tie_break_is_registration_order() {
        let mut router = Router::new();
        router
            .add_handler(Method::GET, "/a.*", Arc::new(first_handler))
            .unwrap();
        router
            .add_handler(Method::GET, "/ab", Arc::new(second_handler))
            .unwrap();

        // Both patterns match; the earlier registration is selected
        let handler = router.route(Method::GET, "/ab").unwrap();
        let mut out: Vec<u8> = Vec::new();
        handler(empty_get("/ab"), &mut out).await.unwrap();
        assert!(String::from_utf8_lossy(&out).contains("first"));
    }

    #[tokio::test]
    async fn test_router_rejects_invalid_pattern() {
        let mut router = Router::new();
        let result = router.add_handler(Method::GET, "/items/[", Arc::new(ok_handler));
        assert!(matches!(result, Err(Error::InvalidPattern(_))));
    }

    #[tokio::test]
    async fn test_handle_connection_with_valid_request() {
        let request = b"GET /test HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let mut stream = MockTcpStream::new(request.to_vec());

        let server = HttpServer::new(ServerConfig::default());
        server
            .add_handler(Method::GET, "/test", ok_handler)
            .await
            .unwrap();

        let result = handle_connection(&mut stream, server.router.clone(), 1024).await;
        assert!(result.is_ok());

        let response = String::from_utf8_lossy(stream.written_data());
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("Content-Type: text/plain\r\n"));
        assert!(response.contains("Connection: close\r\n"));
        assert!(response.contains("Test response"));
    }

    #[tokio::test]
    async fn test_handler_sees_query_params() {
        let request = b"GET /greet?name=world HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let mut stream = MockTcpStream::new(request.to_vec());

        let server = HttpServer::new(ServerConfig::default());
        server
            .add_handler(Method::GET, "/greet", echo_handler)
            .await
            .unwrap();

        handle_connection(&mut stream, server.router.clone(), 1024)
            .await
            .unwrap();

        let response = String::from_utf8_lossy(stream.written_data());
        assert!(response.contains("hello world at /greet"));
    }

    #[tokio::test]
    async fn test_handle_connection_writes_exact_400() {
        // Two tokens in the request line
        let request = b"GET /test\r\nHost: localhost\r\n\r\n";
        let mut stream = MockTcpStream::new(request.to_vec());

        let server = HttpServer::new(ServerConfig::default());
        let result = handle_connection(&mut stream, server.router.clone(), 1024).await;

        assert!(matches!(result, Err(Error::ParseError(_))));

        let body = r#"{"message":"Incorrect request line"}"#;
        let expected = format!(
            "HTTP/1.1 400 Bad Request\r\nContent-Length: {}\r\nConnection: close\r\nContent-Type: application/json\r\n\r\n{}",
            body.len(),
            body
        );
        assert_eq!(stream.written_data(), expected.as_bytes());
    }

    #[tokio::test]
    async fn test_handle_connection_rejects_unknown_method() {
        let request = b"PATCH /test HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let mut stream = MockTcpStream::new(request.to_vec());

        let server = HttpServer::new(ServerConfig::default());
        let result = handle_connection(&mut stream, server.router.clone(), 1024).await;

        assert!(matches!(result, Err(Error::ParseError(_))));
        let response = String::from_utf8_lossy(stream.written_data());
        assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert!(response.contains(r#"{"message":"Method not allowed"}"#));
    }

    #[tokio::test]
    async fn test_handle_connection_with_routing_miss() {
        let request = b"GET /nonexistent HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let mut stream = MockTcpStream::new(request.to_vec());

        let server = HttpServer::new(ServerConfig::default());
        server
            .add_handler(Method::GET, "/test", ok_handler)
            .await
            .unwrap();

        let result = handle_connection(&mut stream, server.router.clone(), 1024).await;
        assert!(matches!(result, Err(Error::NotFound(_))));

        let response = String::from_utf8_lossy(stream.written_data());
        assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(response.contains("Connection: close\r\n"));
        assert!(response.contains("No handler for path: /nonexistent"));
    }

    #[tokio::test]
    async fn test_handle_connection_with_empty_input() {
        // Peer closed without sending anything: not an error, nothing written
        let mut stream = MockTcpStream::new(Vec::new());

        let server = HttpServer::new(ServerConfig::default());
        let result = handle_connection(&mut stream, server.router.clone(), 1024).await;

        assert!(result.is_ok());
        assert!(stream.written_data().is_empty());
    }

    #[tokio::test]
    async fn test_handler_error_propagates() {
        let request = b"GET /fail HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let mut stream = MockTcpStream::new(request.to_vec());

        let server = HttpServer::new(ServerConfig::default());
        server
            .add_handler(Method::GET, "/fail", failing_handler)
            .await
            .unwrap();

        let result = handle_connection(&mut stream, server.router.clone(), 1024).await;
        assert!(matches!(result, Err(Error::InternalError(_))));
    }

    #[tokio::test]
    async fn test_post_body_reaches_handler() {
        fn form_handler(request: Request, out: &mut ResponseSink) -> HandlerFuture<'_> {
            Box::pin(async move {
                let pairs = request
                    .body_params()
                    .iter()
                    .map(|(name, value)| format!("{name}={value}"))
                    .collect::<Vec<_>>()
                    .join(",");
                write_text(out, pairs).await
            })
        }

        let request = b"POST /submit HTTP/1.1\r\n\
            Host: localhost\r\n\
            Content-Type: application/x-www-form-urlencoded\r\n\
            Content-Length: 7\r\n\r\n\
            a=1&b=2";
        let mut stream = MockTcpStream::new(request.to_vec());

        let server = HttpServer::new(ServerConfig::default());
        server
            .add_handler(Method::POST, "/submit", form_handler)
            .await
            .unwrap();

        handle_connection(&mut stream, server.router.clone(), 1024)
            .await
            .unwrap();

        let response = String::from_utf8_lossy(stream.written_data());
        assert!(response.contains("a=1,b=2"));
    }

    #[tokio::test]
    async fn test_concurrent_connections_do_not_cross_talk() {
        fn marker_handler(request: Request, out: &mut ResponseSink) -> HandlerFuture<'_> {
            Box::pin(async move {
                write_text(out, format!("marker:{path};", path = request.path)).await
            })
        }

        let connections = 8;
        let server = HttpServer::new(ServerConfig::default());
        server
            .add_handler(Method::GET, "/c[0-9]+", marker_handler)
            .await
            .unwrap();

        let mut tasks = JoinSet::new();
        for i in 0..connections {
            let router = server.router.clone();
            tasks.spawn(async move {
                let request = format!("GET /c{i} HTTP/1.1\r\nHost: localhost\r\n\r\n");
                let mut stream = MockTcpStream::new(request.into_bytes());
                handle_connection(&mut stream, router, 4096).await.unwrap();
                (i, stream.write_data)
            });
        }

        while let Some(result) = tasks.join_next().await {
            let (i, written) = result.unwrap();
            let response = String::from_utf8_lossy(&written);
            assert!(response.contains(&format!("marker:/c{i};")), "connection {i}");
            for other in 0..connections {
                if other != i {
                    assert!(
                        !response.contains(&format!("marker:/c{other};")),
                        "connection {i} saw bytes for {other}"
                    );
                }
            }
        }
    }

    #[tokio::test]
    async fn test_router_is_shared_across_workers() {
        let router = Arc::new(RwLock::new(Router::new()));
        router
            .write()
            .await
            .add_handler(Method::GET, "/shared", Arc::new(ok_handler))
            .unwrap();

        let mut tasks = JoinSet::new();
        for _ in 0..4 {
            let router = router.clone();
            tasks.spawn(async move {
                let request = b"GET /shared HTTP/1.1\r\nHost: localhost\r\n\r\n";
                let mut stream = MockTcpStream::new(request.to_vec());
                handle_connection(&mut stream, router, 4096).await.unwrap();
                stream.write_data
            });
        }

        while let Some(result) = tasks.join_next().await {
            let written = result.unwrap();
            assert!(String::from_utf8_lossy(&written).contains("Test response"));
        }
    }
}
