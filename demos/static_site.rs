//! A static-site collaborator built on the registration API.
//!
//! Serves the fixed page and resource lists of a small demo site from
//! `./public`, and renders `/classic.html` through a `{time}` template
//! substitution. Everything here lives outside the core: it only registers
//! handlers and lets the server do the framing, routing and dispatch.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::info;
use tinyhttp_rs::{
    HandlerFuture, HttpResponse, HttpServer, Method, Request, ResponseSink, ServerConfig,
    StatusCode,
};
use tokio::io::AsyncWriteExt;

const PAGES: &[&str] = &[
    "/index.html",
    "/events.html",
    "/forms.html",
    "/links.html",
    "/resources.html",
];

const RESOURCES: &[&str] = &[
    "/app.js",
    "/events.js",
    "/spring.png",
    "/spring.svg",
    "/styles.css",
];

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn site_path(request_path: &str) -> PathBuf {
    Path::new("public").join(request_path.trim_start_matches('/'))
}

fn send_file(request: Request, out: &mut ResponseSink) -> HandlerFuture<'_> {
    Box::pin(async move {
        let file_path = site_path(&request.path);
        let content = tokio::fs::read(&file_path).await?;

        let response = HttpResponse::new(StatusCode::Ok)
            .with_content_type(content_type_for(&file_path))
            .with_body_bytes(content);
        out.write_all(&response.to_bytes()).await?;
        out.flush().await?;
        Ok(())
    })
}

fn send_classic(request: Request, out: &mut ResponseSink) -> HandlerFuture<'_> {
    Box::pin(async move {
        let file_path = site_path(&request.path);
        let template = tokio::fs::read_to_string(&file_path).await?;

        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let content = template.replace("{time}", &seconds.to_string());

        let response = HttpResponse::new(StatusCode::Ok)
            .with_content_type("text/html")
            .with_body_string(content);
        out.write_all(&response.to_bytes()).await?;
        out.flush().await?;
        Ok(())
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the logger
    env_logger::init();

    let server = HttpServer::new(ServerConfig::default());

    for page in PAGES {
        server.add_handler(Method::GET, page, send_file).await?;
    }
    for resource in RESOURCES {
        server.add_handler(Method::GET, resource, send_file).await?;
    }

    server.add_handler(Method::POST, "/index.html", send_file).await?;
    server.add_handler(Method::GET, "/classic.html", send_classic).await?;

    info!("Serving demo site from ./public");
    server.listen().await?;
    Ok(())
}
