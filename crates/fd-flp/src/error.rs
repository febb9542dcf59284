//! Error types for fd-flp.

/// Errors that can occur while decoding a project file.
#[derive(Debug, thiserror::Error)]
pub enum FlpError {
    /// The preamble does not match the expected layout.
    #[error("Invalid FLP file: {0}")]
    InvalidFormat(String),

    /// A read needed more bytes than the buffer holds.
    #[error("Unexpected end of data: need {need} bytes, have {have}")]
    UnexpectedEnd { need: usize, have: usize },

    /// A text event declares a length beyond what the decoder accepts.
    #[error("Text event length {0} exceeds limit")]
    TextTooLong(u64),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FlpError {
    /// Create an invalid format error.
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }
}

impl From<FlpError> for fd_core::Error {
    fn from(e: FlpError) -> Self {
        match e {
            FlpError::Io(source) => Self::Io { source },
            other => Self::InvalidFormat(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_map_to_invalid_format() {
        let err: fd_core::Error = FlpError::invalid_format("missing FLhd header").into();
        assert_eq!(err.http_status(), 422);
        assert!(err.to_string().contains("missing FLhd header"));

        let err: fd_core::Error = FlpError::UnexpectedEnd { need: 4, have: 1 }.into();
        assert!(matches!(err, fd_core::Error::InvalidFormat(_)));
    }

    #[test]
    fn io_errors_stay_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: fd_core::Error = FlpError::from(io).into();
        assert!(matches!(err, fd_core::Error::Io { .. }));
    }
}
