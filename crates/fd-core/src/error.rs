//! Unified error type for flpdeck.
//!
//! All crates funnel their failures into [`Error`], which carries enough context
//! for API handlers to derive an HTTP status code via [`Error::http_status`].

use std::fmt;

/// Unified error type covering all failure modes in flpdeck.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "file", "folder").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// Request data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A conflicting resource already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The requested byte range cannot be served from a file of `size` bytes.
    #[error("Range not satisfiable for {size} byte file")]
    RangeNotSatisfiable {
        /// Total size of the file the range was resolved against.
        size: u64,
    },

    /// A project file is not in the expected binary format.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::Validation(_) => 400,
            Error::Conflict(_) => 409,
            Error::RangeNotSatisfiable { .. } => 416,
            Error::InvalidFormat(_) => 422,
            Error::Io { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = Error::not_found("file", "beats/loop.mp3");
        assert_eq!(err.to_string(), "file not found: beats/loop.mp3");
        assert_eq!(err.http_status(), 404);
    }

    #[test]
    fn validation_display() {
        let err = Error::validation("name is required");
        assert_eq!(err.to_string(), "Validation error: name is required");
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn conflict_display() {
        let err = Error::Conflict("folder already exists".into());
        assert_eq!(err.to_string(), "Conflict: folder already exists");
        assert_eq!(err.http_status(), 409);
    }

    #[test]
    fn range_not_satisfiable_carries_size() {
        let err = Error::RangeNotSatisfiable { size: 1000 };
        assert_eq!(err.to_string(), "Range not satisfiable for 1000 byte file");
        assert_eq!(err.http_status(), 416);
    }

    #[test]
    fn invalid_format_display() {
        let err = Error::InvalidFormat("missing FLhd magic".into());
        assert_eq!(err.to_string(), "Invalid format: missing FLhd magic");
        assert_eq!(err.http_status(), 422);
    }

    #[test]
    fn io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn internal_display() {
        let err = Error::Internal("unexpected state".into());
        assert_eq!(err.to_string(), "Internal error: unexpected state");
        assert_eq!(err.http_status(), 500);
    }
}
