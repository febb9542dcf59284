//! Range-aware file streaming.
//!
//! [`resolve_range`] turns an optional `Range` header into a byte window
//! validated against the file size, and [`serve_file`] answers with `200`
//! or `206` and a body that reads the window lazily in fixed-size chunks.
//! The open file handle is owned by the body stream, so it is released when
//! the stream finishes or the client goes away.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use fd_core::media::content_type_for;
use fd_core::{Error, Result};

/// Read size for streamed bodies.
const CHUNK_SIZE: usize = 64 * 1024;

/// Inclusive byte window `[start, end]` of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    pub start: u64,
    pub end: u64,
}

impl RangeSpec {
    /// Number of bytes in the window.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Resolve a `Range` header value against a file of `size` bytes.
///
/// Accepts only `bytes=<start>-<end>` where either side may be empty. A
/// missing start means 0, a missing end means the last byte, and an end
/// past the last byte is clamped. Without a header the whole file is
/// selected.
pub fn resolve_range(spec: Option<&str>, size: u64) -> Result<RangeSpec> {
    let last = size.saturating_sub(1);
    let Some(spec) = spec else {
        return Ok(RangeSpec { start: 0, end: last });
    };

    let unsatisfiable = || Error::RangeNotSatisfiable { size };

    let (start_str, end_str) = spec
        .strip_prefix("bytes=")
        .and_then(|s| s.split_once('-'))
        .ok_or_else(unsatisfiable)?;

    let start = match parse_bound(start_str) {
        Some(Some(v)) => v,
        Some(None) => 0,
        None => return Err(unsatisfiable()),
    };
    let end = match parse_bound(end_str) {
        Some(Some(v)) => v.min(last),
        Some(None) => last,
        None => return Err(unsatisfiable()),
    };

    if start > end || start >= size {
        return Err(unsatisfiable());
    }

    Ok(RangeSpec { start, end })
}

/// `Some(None)` for an empty bound, `Some(Some(n))` for plain digits,
/// `None` for anything else.
fn parse_bound(s: &str) -> Option<Option<u64>> {
    if s.is_empty() {
        return Some(None);
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok().map(Some)
}

/// Join a client-supplied `/`-separated relative path onto `root`.
///
/// Rejects empty input and any segment that could step outside `root`.
pub fn safe_join(root: &Path, relative: &str) -> Result<PathBuf> {
    if relative.is_empty() {
        return Err(Error::validation("Missing path"));
    }

    let mut path = root.to_path_buf();
    for segment in relative.split('/') {
        if segment.is_empty()
            || segment == "."
            || segment == ".."
            || segment.contains('\\')
            || segment.contains('\0')
            || Path::new(segment).is_absolute()
        {
            return Err(Error::validation(format!("Invalid path: {relative}")));
        }
        path.push(segment);
    }
    Ok(path)
}

/// Serve `path`, honouring an optional `Range` header value.
pub async fn serve_file(path: &Path, range_header: Option<&str>) -> Result<Response> {
    let mut file = tokio::fs::File::open(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::not_found("file", path.display())
        } else {
            Error::from(e)
        }
    })?;

    let metadata = file.metadata().await?;
    if !metadata.is_file() {
        return Err(Error::not_found("file", path.display()));
    }

    let file_size = metadata.len();
    let content_type = content_type_for(path);
    let window = resolve_range(range_header, file_size)?;

    if range_header.is_none() {
        tracing::debug!(path = %path.display(), size = file_size, "Streaming full file");

        let stream = ReaderStream::with_capacity(file, CHUNK_SIZE);
        return Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, content_type.to_string()),
                (header::CONTENT_LENGTH, file_size.to_string()),
                (header::ACCEPT_RANGES, "bytes".to_string()),
            ],
            Body::from_stream(stream),
        )
            .into_response());
    }

    let RangeSpec { start, end } = window;
    let length = window.len();
    tracing::debug!(path = %path.display(), start, end, size = file_size, "Streaming range");

    file.seek(SeekFrom::Start(start))
        .await
        .map_err(|e| Error::Internal(format!("Seek failed: {e}")))?;

    // Limit reads to exactly the window.
    let stream = ReaderStream::with_capacity(file.take(length), CHUNK_SIZE);

    Ok((
        StatusCode::PARTIAL_CONTENT,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_RANGE,
                format!("bytes {start}-{end}/{file_size}"),
            ),
            (header::CONTENT_LENGTH, length.to_string()),
            (header::ACCEPT_RANGES, "bytes".to_string()),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}
