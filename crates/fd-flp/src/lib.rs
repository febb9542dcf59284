//! # fd-flp
//!
//! Extracts tempo, title and version from FL Studio project files (`.flp`)
//! without decoding the rest of the format.
//!
//! A project file is a short preamble followed by a flat stream of tagged
//! events. The decoder validates the preamble strictly, then scans events
//! until all three fields are known or the data runs out. Truncated or
//! corrupt trailing data is tolerated: whatever was decoded before the
//! damage is returned.
//!
//! ## Example
//!
//! ```no_run
//! # async fn run() -> Result<(), fd_flp::FlpError> {
//! let meta = fd_flp::read_metadata("Beat_3.flp").await?;
//! if let Some(bpm) = meta.bpm {
//!     println!("{bpm} BPM");
//! }
//! # Ok(())
//! # }
//! ```

pub mod cursor;
pub mod decoder;
pub mod error;
pub mod event;
pub mod header;
pub mod metadata;

pub use decoder::parse_metadata;
pub use error::FlpError;
pub use header::{read_header, FileHeader};
pub use metadata::FlpMetadata;

use std::path::Path;

/// Read a project file and decode its metadata.
pub async fn read_metadata<P: AsRef<Path>>(path: P) -> Result<FlpMetadata, FlpError> {
    let buf = tokio::fs::read(path.as_ref()).await?;
    parse_metadata(&buf)
}
