//! Fixed-format file preamble: the `FLhd` header chunk and the `FLdt` data
//! chunk marker.
//!
//! ```text
//! "FLhd" u32 len=6 | u16 format | u16 channels | u16 ppq | "FLdt" u32 len | events...
//! ```

use serde::Serialize;

use crate::cursor::ByteCursor;
use crate::error::FlpError;

/// Magic bytes at offset 0.
pub const HEADER_MAGIC: &[u8; 4] = b"FLhd";

/// Marker that opens the event data chunk.
pub const DATA_MAGIC: &[u8; 4] = b"FLdt";

/// The only header length ever written.
pub const HEADER_LEN: u32 = 6;

/// Values carried by the header chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileHeader {
    pub format: u16,
    pub channels: u16,
    /// Pulses per quarter note.
    pub ppq: u16,
    /// Declared size of the event data. Not trusted by the decoder.
    pub data_len: u32,
}

/// Validate the preamble and return a cursor positioned at the first event.
///
/// A buffer too short to hold the preamble is reported as
/// [`FlpError::InvalidFormat`].
pub fn read_header(buf: &[u8]) -> Result<(FileHeader, ByteCursor<'_>), FlpError> {
    let mut cur = ByteCursor::new(buf);

    let magic = cur
        .read_bytes(4)
        .map_err(|_| FlpError::invalid_format("missing FLhd header"))?;
    if magic != HEADER_MAGIC {
        return Err(FlpError::invalid_format("missing FLhd header"));
    }

    let header_len = cur.read_u32_le().map_err(truncated)?;
    if header_len != HEADER_LEN {
        return Err(FlpError::invalid_format(format!(
            "header length {header_len}, expected {HEADER_LEN}"
        )));
    }

    let format = cur.read_u16_le().map_err(truncated)?;
    let channels = cur.read_u16_le().map_err(truncated)?;
    let ppq = cur.read_u16_le().map_err(truncated)?;

    let marker = cur.read_bytes(4).map_err(truncated)?;
    if marker != DATA_MAGIC {
        return Err(FlpError::invalid_format("expected FLdt chunk"));
    }
    let data_len = cur.read_u32_le().map_err(truncated)?;

    let header = FileHeader {
        format,
        channels,
        ppq,
        data_len,
    };
    Ok((header, cur))
}

fn truncated(err: FlpError) -> FlpError {
    FlpError::invalid_format(format!("truncated preamble ({err})"))
}
