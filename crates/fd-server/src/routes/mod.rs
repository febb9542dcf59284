//! Route handlers for the HTTP API.

pub mod folders;
pub mod health;
pub mod media;
pub mod projects;

use axum::http::{header, HeaderMap};

/// The raw `Range` header, if present.
///
/// A value that is not visible ASCII comes back as `""`, which never parses
/// as a range, so it is answered with 416 instead of the whole file.
pub(crate) fn range_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::RANGE)
        .map(|v| v.to_str().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn absent_header_is_none() {
        assert_eq!(range_header(&HeaderMap::new()), None);
    }

    #[test]
    fn ascii_header_passes_through() {
        let mut headers = HeaderMap::new();
        headers.insert(header::RANGE, HeaderValue::from_static("bytes=0-9"));
        assert_eq!(range_header(&headers), Some("bytes=0-9"));
    }

    #[test]
    fn opaque_header_is_present_but_unparsable() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::RANGE,
            HeaderValue::from_bytes(b"bytes=100-199\xff").unwrap(),
        );
        assert_eq!(range_header(&headers), Some(""));
    }
}
