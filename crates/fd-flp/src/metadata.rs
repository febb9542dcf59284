//! The subset of project metadata the decoder extracts.

use serde::Serialize;

/// Tempo, title and version of a project.
///
/// Each field stays `None` until an event in the file sets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlpMetadata {
    pub bpm: Option<f64>,
    pub title: Option<String>,
    pub version: Option<String>,
}

impl FlpMetadata {
    /// True once every field has been set.
    pub fn is_complete(&self) -> bool {
        self.bpm.is_some() && self.title.is_some() && self.version.is_some()
    }
}
