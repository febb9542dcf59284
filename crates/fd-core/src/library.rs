//! Library records returned by the listing endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A user-configured directory of projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,
    pub path: PathBuf,
    /// Cover image path relative to `path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

/// A streamable file and the URL it is served from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaLink {
    pub name: String,
    pub url: String,
}

/// How a project was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    /// A subdirectory holding renders (and possibly project files).
    Folder,
    /// A loose project file grouped with same-named renders.
    File,
}

/// One entry in a project listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub kind: ProjectKind,
    pub mp3s: Vec<MediaLink>,
    pub last: Option<MediaLink>,
    /// Project file the metadata was decoded from, relative to the root.
    pub project_file: Option<String>,
    pub bpm: Option<f64>,
    pub title: Option<String>,
    pub version: Option<String>,
    pub modified: Option<DateTime<Utc>>,
}
