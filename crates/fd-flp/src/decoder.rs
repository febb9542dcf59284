//! Event scan that projects the interesting events onto [`FlpMetadata`].

use crate::cursor::ByteCursor;
use crate::error::FlpError;
use crate::event::{read_event, Event};
use crate::header::read_header;
use crate::metadata::FlpMetadata;

/// Integer tempo in BPM (word).
pub const TEMPO: u8 = 66;
/// Tempo in thousandths of a BPM (dword).
pub const FINE_TEMPO: u8 = 156;
/// Project title (text).
pub const TITLE: u8 = 194;
/// Version string of the FL Studio build that saved the file (text).
pub const VERSION: u8 = 199;

enum State {
    Scanning,
    Done,
}

/// Decode metadata from a complete project file buffer.
///
/// Only a malformed preamble is an error. Once the event data is reached,
/// a truncated or unreadable event ends the scan and the fields found so
/// far are returned.
pub fn parse_metadata(buf: &[u8]) -> Result<FlpMetadata, FlpError> {
    let (_, cursor) = read_header(buf)?;
    Ok(scan_events(cursor))
}

fn scan_events(mut cur: ByteCursor<'_>) -> FlpMetadata {
    let mut meta = FlpMetadata::default();
    let mut state = State::Scanning;

    loop {
        state = match state {
            State::Done => break,
            State::Scanning if meta.is_complete() || cur.remaining() < 2 => State::Done,
            State::Scanning => match read_event(&mut cur) {
                Ok(event) => {
                    apply(&mut meta, &event);
                    State::Scanning
                }
                Err(e) => {
                    tracing::debug!(offset = cur.position(), error = %e, "Stopping event scan");
                    State::Done
                }
            },
        };
    }

    meta
}

/// Assign the event's value to its field. Later events overwrite earlier
/// ones, so the last tempo of either kind wins.
fn apply(meta: &mut FlpMetadata, event: &Event<'_>) {
    match event.id {
        TEMPO => {
            if let Some(v) = event.value.as_int() {
                meta.bpm = Some(f64::from(v));
            }
        }
        FINE_TEMPO => {
            if let Some(v) = event.value.as_int() {
                meta.bpm = Some(f64::from(v) / 1000.0);
            }
        }
        TITLE => {
            if let Some(text) = event.value.text() {
                meta.title = Some(text);
            }
        }
        VERSION => {
            if let Some(text) = event.value.text() {
                meta.version = Some(text);
            }
        }
        _ => {}
    }
}
