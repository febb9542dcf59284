//! fd-core: shared types, errors, configuration, and the media type table.
//!
//! This crate is the foundational dependency for the other fd-* crates. It
//! carries no I/O beyond reading the config file.

pub mod config;
pub mod error;
pub mod library;
pub mod media;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use library::*;
