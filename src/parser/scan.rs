//! Byte-buffer scanning for protocol delimiters.

/// Find the first occurrence of `needle` within `haystack[start..limit)`.
///
/// Returns the lowest index at which `needle` begins, or `None` if the
/// needle does not fit inside the window. The window bounds are clamped to
/// the haystack length, so callers can pass the raw read count as `limit`.
///
/// The delimiters this server scans for are two and four bytes long and the
/// buffer is capped at one read window, so a naive scan is sufficient.
///
/// # Examples
///
/// ```
/// use tinyhttp_rs::parser::find;
///
/// let buf = b"GET / HTTP/1.1\r\nHost: x\r\n\r\n";
/// assert_eq!(find(buf, b"\r\n", 0, buf.len()), Some(14));
/// assert_eq!(find(buf, b"\r\n\r\n", 16, buf.len()), Some(23));
/// assert_eq!(find(buf, b"\r\n", 0, 10), None);
/// ```
pub fn find(haystack: &[u8], needle: &[u8], start: usize, limit: usize) -> Option<usize> {
    let limit = limit.min(haystack.len());
    if needle.is_empty() || start >= limit || needle.len() > limit - start {
        return None;
    }

    haystack[start..limit]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| start + pos)
}
