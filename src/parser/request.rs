//! HTTP request parsing and representation.

use std::str::FromStr;

use crate::parser::error::Error;
use crate::parser::method::Method;
use crate::parser::scan::find;

const REQUEST_LINE_DELIMITER: &[u8] = b"\r\n";
const HEADER_BLOCK_DELIMITER: &[u8] = b"\r\n\r\n";

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// The body of a request, when one applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Raw body text for any content type the server does not interpret.
    Text(String),
    /// Ordered name/value pairs for `application/x-www-form-urlencoded`
    /// bodies. For `multipart/form-data` the sequence is empty: multipart
    /// parsing is not implemented.
    Form(Vec<(String, String)>),
}

/// A parsed HTTP request.
///
/// Constructed once per connection from the raw read window and immutable
/// afterwards. `method` is always a member of the allowed set and `path`
/// always begins with `/`.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, PUT, DELETE)
    pub method: Method,
    /// The request path, with the query component stripped
    pub path: String,
    /// Query parameters in order of appearance, duplicates preserved
    pub query_params: Vec<(String, String)>,
    /// Raw header lines in wire order
    pub headers: Vec<String>,
    /// The request body, if one was attached
    pub body: Option<Body>,
}

impl Request {
    /// Look up a header value by a case-sensitive `"Name: "` prefix scan
    /// over the raw header lines.
    ///
    /// Returns the first matching line's value. The header block is kept as
    /// raw lines, so this is a linear scan.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find_map(|line| line.strip_prefix(name).and_then(|rest| rest.strip_prefix(": ")))
    }

    /// Get the first query parameter registered under `name`.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The raw body text, when the body was not form-encoded.
    pub fn body_text(&self) -> Option<&str> {
        match &self.body {
            Some(Body::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// The ordered body pairs of a form-encoded body.
    ///
    /// Empty for text bodies, absent bodies, and multipart bodies.
    pub fn body_params(&self) -> &[(String, String)] {
        match &self.body {
            Some(Body::Form(pairs)) => pairs,
            _ => &[],
        }
    }
}

/// Split a query or form-encoded string into ordered name/value pairs.
///
/// Pairs are `&`-separated and the first `=` splits name from value. A pair
/// without `=` becomes a name with an empty value. No percent-decoding is
/// performed.
fn parse_pairs(input: &str) -> Vec<(String, String)> {
    input
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) => (name.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

/// Parse an HTTP request from one read window.
///
/// `buf` is the bytes of a single read (at most 4096; a short read is fine
/// if the peer sent less). The request line, header block and body are all
/// located inside this window by delimiter scanning.
///
/// On failure the returned error's `Display` text is the message that
/// belongs in the 400 response body; the caller must write that response
/// and stop processing the connection.
///
/// # Examples
///
/// ```
/// use tinyhttp_rs::{parse_request, Method};
///
/// let request = parse_request(b"GET /a/b HTTP/1.1\r\nHost: x\r\n\r\n").unwrap();
/// assert_eq!(request.method, Method::GET);
/// assert_eq!(request.path, "/a/b");
/// assert_eq!(request.headers, vec!["Host: x".to_string()]);
/// ```
pub fn parse_request(buf: &[u8]) -> Result<Request, Error> {
    let read = buf.len();

    // Request line: everything up to the first CRLF
    let request_line_end =
        find(buf, REQUEST_LINE_DELIMITER, 0, read).ok_or(Error::MissingRequestLine)?;

    let request_line = String::from_utf8_lossy(&buf[..request_line_end]).into_owned();
    let parts: Vec<&str> = request_line.split(' ').collect();
    if parts.len() != 3 {
        return Err(Error::MalformedRequestLine);
    }

    let method = Method::from_str(parts[0])?;

    let target = parts[1];
    if !target.starts_with('/') {
        return Err(Error::InvalidPath);
    }
    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path.to_string(), query),
        None => (target.to_string(), ""),
    };
    let query_params = parse_pairs(query);

    // Header block: between the request line and the first blank line. The
    // scan starts at the request-line CRLF so that a request with no
    // headers (CRLFCRLF right after the request line) is still framed.
    let headers_start = request_line_end + REQUEST_LINE_DELIMITER.len();
    let headers_end = find(buf, HEADER_BLOCK_DELIMITER, request_line_end, read)
        .ok_or(Error::MissingHeaderTerminator)?;

    let headers: Vec<String> = if headers_end <= headers_start {
        Vec::new()
    } else {
        String::from_utf8_lossy(&buf[headers_start..headers_end])
            .split("\r\n")
            .map(str::to_string)
            .collect()
    };

    let mut request = Request {
        method,
        path,
        query_params,
        headers,
        body: None,
    };

    // GET requests never carry a body
    if method != Method::GET {
        let body_start = headers_end + HEADER_BLOCK_DELIMITER.len();
        request.body = read_body(&request, buf, body_start);
    }

    Ok(request)
}

/// Attach the body that follows the header block, if one applies.
///
/// A missing or unparsable `Content-Length` means no body (not an error),
/// and so does a `Content-Type` header with an empty value. Otherwise up to
/// `Content-Length` bytes are taken from the window.
fn read_body(request: &Request, buf: &[u8], body_start: usize) -> Option<Body> {
    let length: usize = request.header_value("Content-Length")?.parse().ok()?;
    let content_type = request.header_value("Content-Type");
    if content_type == Some("") {
        return None;
    }

    let body_end = (body_start + length).min(buf.len());
    let raw = String::from_utf8_lossy(&buf[body_start..body_end]).into_owned();

    match content_type {
        Some(FORM_URLENCODED) => Some(Body::Form(parse_pairs(&raw))),
        Some(content_type) if content_type.starts_with(MULTIPART_FORM_DATA) => {
            // Multipart parsing is unimplemented; the pair sequence stays
            // empty rather than failing the request.
            Some(Body::Form(Vec::new()))
        }
        _ => Some(Body::Text(raw)),
    }
}
