//! Tagged variable-width records of the event data chunk.
//!
//! The event id selects how many value bytes follow:
//!
//! | id        | width                                     |
//! |-----------|-------------------------------------------|
//! | `0..=63`  | 1 byte                                    |
//! | `64..=127`| 2 bytes, little-endian                    |
//! | `128..=191`| 4 bytes, little-endian                   |
//! | `192..=255`| 7-bit continuation length, then raw bytes |

use crate::cursor::ByteCursor;
use crate::error::FlpError;

/// Upper bound on a single text event payload (64 MB).
pub const MAX_TEXT_LEN: u64 = 64 * 1024 * 1024;

/// Continuation-length bytes accepted before the length is rejected.
const MAX_LENGTH_BYTES: u32 = 5;

/// Encoding category selected by the event id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthClass {
    Byte,
    Word,
    Dword,
    Text,
}

impl WidthClass {
    pub fn of(id: u8) -> Self {
        match id {
            0..=63 => Self::Byte,
            64..=127 => Self::Word,
            128..=191 => Self::Dword,
            _ => Self::Text,
        }
    }
}

/// Decoded payload of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventValue<'a> {
    Int(u32),
    /// Raw text bytes, borrowed from the source buffer.
    Text(&'a [u8]),
}

impl EventValue<'_> {
    pub fn as_int(&self) -> Option<u32> {
        match *self {
            Self::Int(v) => Some(v),
            Self::Text(_) => None,
        }
    }

    /// UTF-8 text with one trailing NUL removed. Invalid sequences are
    /// replaced rather than rejected.
    pub fn text(&self) -> Option<String> {
        match *self {
            Self::Int(_) => None,
            Self::Text(raw) => {
                let raw = raw.strip_suffix(b"\0").unwrap_or(raw);
                Some(String::from_utf8_lossy(raw).into_owned())
            }
        }
    }
}

/// One record from the event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event<'a> {
    pub id: u8,
    pub value: EventValue<'a>,
}

impl Event<'_> {
    pub fn width(&self) -> WidthClass {
        WidthClass::of(self.id)
    }
}

/// Read the next event.
///
/// On error the cursor may have advanced part way into the event; callers
/// stop scanning rather than resynchronise.
pub fn read_event<'a>(cur: &mut ByteCursor<'a>) -> Result<Event<'a>, FlpError> {
    let id = cur.read_u8()?;
    let first = cur.read_u8()?;

    let value = match WidthClass::of(id) {
        WidthClass::Byte => EventValue::Int(u32::from(first)),
        WidthClass::Word => {
            let mut value = u32::from(first);
            value |= u32::from(cur.read_u8()?) << 8;
            EventValue::Int(value)
        }
        WidthClass::Dword => {
            let mut value = u32::from(first);
            value |= u32::from(cur.read_u8()?) << 8;
            value |= u32::from(cur.read_u8()?) << 16;
            value |= u32::from(cur.read_u8()?) << 24;
            EventValue::Int(value)
        }
        WidthClass::Text => {
            let len = read_text_len(cur, first)?;
            EventValue::Text(cur.read_bytes(len)?)
        }
    };

    Ok(Event { id, value })
}

/// Finish a little-endian 7-bit continuation length whose first byte has
/// already been consumed.
fn read_text_len(cur: &mut ByteCursor<'_>, first: u8) -> Result<usize, FlpError> {
    let mut byte = first;
    let mut len = u64::from(byte & 0x7F);
    let mut shift = 0;
    let mut count = 1;

    while byte & 0x80 != 0 {
        if count == MAX_LENGTH_BYTES {
            return Err(FlpError::invalid_format(format!(
                "text length uses more than {MAX_LENGTH_BYTES} bytes"
            )));
        }
        byte = cur.read_u8()?;
        shift += 7;
        len |= u64::from(byte & 0x7F) << shift;
        count += 1;
    }

    if len > MAX_TEXT_LEN {
        return Err(FlpError::TextTooLong(len));
    }
    usize::try_from(len).map_err(|_| FlpError::TextTooLong(len))
}
